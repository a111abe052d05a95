//! Benchmarks for the boundary-value solve paths.
//!
//! Run with: cargo bench -p fdbvp-core

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fdbvp_core::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_problem() -> LinearBvp<fn(f64) -> f64, fn(f64) -> f64, fn(f64) -> f64> {
    LinearBvp::new(
        (|x: f64| -x) as fn(f64) -> f64,
        (|x: f64| x * x) as fn(f64) -> f64,
        (|x: f64| 2.0 * x + 1.0) as fn(f64) -> f64,
    )
    .on_interval(1.0, 2.0)
    .with_boundary(0.0, 2.0)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_solve_methods(c: &mut Criterion) {
    let problem = create_problem();
    let solver = BvpSolver::default();

    let mut group = c.benchmark_group("solve");
    for size in [16usize, 64, 256] {
        group.throughput(Throughput::Elements(size as u64));
        for method in SolveMethod::ALL {
            group.bench_with_input(BenchmarkId::new(method.as_str(), size), &size, |b, &n| {
                b.iter(|| solver.solve_with(black_box(&problem), n, method));
            });
        }
    }
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let solver = BvpSolver::default();
    let solution = match solver.solve(&create_problem(), 64) {
        Ok(solution) => solution,
        Err(e) => panic!("benchmark setup failed: {e}"),
    };

    c.bench_function("fit_degree_5_64_nodes", |b| {
        b.iter(|| solver.fit(black_box(&solution), None));
    });
}

criterion_group!(benches, bench_solve_methods, bench_fit);
criterion_main!(benches);
