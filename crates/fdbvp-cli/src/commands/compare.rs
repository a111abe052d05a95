//! Compare command implementation.
//!
//! Solves the same problem with the Thomas algorithm and a dense LU solve and
//! reports where they disagree.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fdbvp_core::{BvpSolver, MethodComparison, SolverSettings};

use crate::cli::OutputFormat;
use crate::commands::{format_value, ProblemArgs};
use crate::output::{print_header, print_json, print_output, print_warning, KeyValue};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    /// Relative tolerance for agreement
    #[arg(short, long, default_value = "1e-6")]
    pub tolerance: f64,
}

/// One node of the comparison.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ComparisonRow {
    #[tabled(rename = "i")]
    pub index: usize,
    #[tabled(rename = "x", display_with = "format_value")]
    pub x: f64,
    #[tabled(rename = "Thomas", display_with = "format_value")]
    pub thomas: f64,
    #[tabled(rename = "Dense", display_with = "format_value")]
    pub dense: f64,
    #[tabled(rename = "|Diff|", display_with = "format_diff")]
    pub diff: f64,
}

fn format_diff(value: &f64) -> String {
    format!("{value:.3e}")
}

fn comparison_rows(comparison: &MethodComparison) -> Vec<ComparisonRow> {
    comparison
        .thomas
        .points()
        .zip(comparison.dense.values())
        .enumerate()
        .map(|(index, ((x, thomas), &dense))| ComparisonRow {
            index,
            x,
            thomas,
            dense,
            diff: (thomas - dense).abs(),
        })
        .collect()
}

/// Comparison result as emitted in JSON.
#[derive(Debug, Serialize)]
struct CompareReport {
    n: usize,
    tolerance: f64,
    agree: bool,
    max_abs_diff: f64,
    max_rel_diff: f64,
    nodes: Vec<ComparisonRow>,
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, settings: SolverSettings, format: OutputFormat, quiet: bool) -> Result<()> {
    let solver = BvpSolver::new(settings)?;
    let setup = args.problem.resolve();

    let comparison = solver.compare(&setup.problem, setup.n)?;
    let agree = comparison.agrees_within(args.tolerance);
    let rows = comparison_rows(&comparison);

    match format {
        OutputFormat::Table => {
            if !quiet {
                print_header("Boundary-Value Problem");
                print_output(&setup.describe(), format)?;
            }
            print_header("Thomas vs Dense");
            print_output(&rows, format)?;

            print_header("Agreement");
            let summary = vec![
                KeyValue::from_scientific("Max Abs Diff", comparison.max_abs_diff),
                KeyValue::from_scientific("Max Rel Diff", comparison.max_rel_diff),
                KeyValue::new(
                    format!("Agree (rel {:e})", args.tolerance),
                    if agree { "yes" } else { "no" },
                ),
            ];
            print_output(&summary, format)?;
        }
        OutputFormat::Json => {
            print_json(&CompareReport {
                n: setup.n,
                tolerance: args.tolerance,
                agree,
                max_abs_diff: comparison.max_abs_diff,
                max_rel_diff: comparison.max_rel_diff,
                nodes: rows,
            })?;
        }
        OutputFormat::Csv => {
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            println!("{:e}", comparison.max_rel_diff);
        }
    }

    if !agree {
        print_warning(&format!(
            "methods disagree beyond relative tolerance {:e} (max abs diff {:e})",
            args.tolerance, comparison.max_abs_diff
        ));
    }

    Ok(())
}
