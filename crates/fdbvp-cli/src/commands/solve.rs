//! Solve command implementation.
//!
//! Solves the boundary-value problem on a uniform grid and, unless disabled,
//! fits a canonical polynomial through the solution.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use fdbvp_core::{BvpSolution, BvpSolver, Polynomial, SolveMethod, SolverSettings};

use crate::cli::OutputFormat;
use crate::commands::{NodeRow, ProblemArgs};
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    /// Linear solver: thomas or dense (overrides the settings file)
    #[arg(short, long)]
    pub method: Option<SolveMethod>,

    /// Degree of the fitted polynomial (default: min(max_fit_degree, n))
    #[arg(short, long)]
    pub degree: Option<usize>,

    /// Skip the polynomial fit
    #[arg(long)]
    pub no_fit: bool,
}

/// Fitted polynomial summary.
#[derive(Debug, Serialize)]
pub struct FitSummary {
    pub degree: usize,
    pub coefficients: Vec<f64>,
    pub rendered: String,
    pub max_residual: f64,
}

impl FitSummary {
    /// Summarizes `polynomial` as fitted to `solution`.
    pub fn new(solver: &BvpSolver, solution: &BvpSolution, polynomial: &Polynomial) -> Result<Self> {
        Ok(Self {
            degree: polynomial.degree(),
            coefficients: polynomial.coefficients().to_vec(),
            rendered: solver.render(polynomial),
            max_residual: polynomial.max_residual(solution.nodes(), solution.values())?,
        })
    }

    /// Key-value rows for table output.
    pub fn rows(&self) -> Vec<KeyValue> {
        vec![
            KeyValue::new("Degree", self.degree.to_string()),
            KeyValue::new("Polynomial", self.rendered.clone()),
            KeyValue::from_scientific("Max Residual", self.max_residual),
        ]
    }
}

/// Solve result as emitted in JSON.
#[derive(Debug, Serialize)]
struct SolveReport {
    method: SolveMethod,
    n: usize,
    nodes: Vec<NodeRow>,
    fit: Option<FitSummary>,
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, settings: SolverSettings, format: OutputFormat, quiet: bool) -> Result<()> {
    let settings = match args.method {
        Some(method) => settings.with_method(method),
        None => settings,
    };
    let solver = BvpSolver::new(settings)?;
    let setup = args.problem.resolve();

    let solution = solver.solve(&setup.problem, setup.n)?;
    info!(method = %solution.method(), n = setup.n, "solved");

    let fit = if args.no_fit {
        None
    } else {
        let polynomial = solver.fit(&solution, args.degree)?;
        Some(FitSummary::new(&solver, &solution, &polynomial)?)
    };

    let rows = NodeRow::from_points(solution.points(), setup.exact);

    match format {
        OutputFormat::Table => {
            if !quiet {
                print_header("Boundary-Value Problem");
                let mut description = setup.describe();
                description.push(KeyValue::new("Method", solution.method().to_string()));
                print_output(&description, format)?;
            }
            print_header("Solution");
            print_output(&rows, format)?;
            if let Some(fit) = &fit {
                print_header("Polynomial Fit");
                print_output(&fit.rows(), format)?;
            }
        }
        OutputFormat::Json => {
            print_json(&SolveReport {
                method: solution.method(),
                n: setup.n,
                nodes: rows,
                fit,
            })?;
        }
        OutputFormat::Csv => {
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for y in solution.values() {
                println!("{y}");
            }
        }
    }

    Ok(())
}
