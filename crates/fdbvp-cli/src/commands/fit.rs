//! Fit command implementation.
//!
//! Solves the problem, fits a canonical polynomial through the grid values,
//! and optionally samples the fitted curve.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fdbvp_core::{BvpSolver, Polynomial, SolveMethod, SolverSettings};

use crate::cli::OutputFormat;
use crate::commands::solve::FitSummary;
use crate::commands::{format_value, ProblemArgs};
use crate::error::CliError;
use crate::output::{print_header, print_json, print_output};

/// Arguments for the fit command.
#[derive(Args, Debug)]
pub struct FitArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,

    /// Linear solver: thomas or dense (overrides the settings file)
    #[arg(short, long)]
    pub method: Option<SolveMethod>,

    /// Degree of the fitted polynomial (default: min(max_fit_degree, n))
    #[arg(short, long)]
    pub degree: Option<usize>,

    /// Decimals in the rendered polynomial (overrides the settings file)
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Strip trailing zeros from rendered coefficients
    #[arg(long)]
    pub trim: bool,

    /// Evaluate the polynomial at this many evenly spaced points
    #[arg(short, long)]
    pub samples: Option<usize>,
}

/// One coefficient of the fitted polynomial.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CoefficientRow {
    #[tabled(rename = "Power")]
    pub power: usize,
    #[tabled(rename = "Coefficient", display_with = "format_value")]
    pub coefficient: f64,
}

/// One sampled point of the fitted curve.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SampleRow {
    #[tabled(rename = "x", display_with = "format_value")]
    pub x: f64,
    #[tabled(rename = "P(x)", display_with = "format_value")]
    pub value: f64,
}

/// Fit result as emitted in JSON.
#[derive(Debug, Serialize)]
struct FitReport {
    #[serde(flatten)]
    summary: FitSummary,
    samples: Vec<SampleRow>,
}

fn sample_rows(polynomial: &Polynomial, x0: f64, xk: f64, count: Option<usize>) -> Result<Vec<SampleRow>> {
    let Some(count) = count else {
        return Ok(Vec::new());
    };
    if count < 2 {
        return Err(CliError::InvalidSampleCount(count).into());
    }
    Ok(polynomial
        .sample(x0, xk, count)?
        .into_iter()
        .map(|(x, value)| SampleRow { x, value })
        .collect())
}

/// Execute the fit command.
pub fn execute(args: FitArgs, settings: SolverSettings, format: OutputFormat, quiet: bool) -> Result<()> {
    let mut settings = settings;
    if let Some(method) = args.method {
        settings = settings.with_method(method);
    }
    if let Some(precision) = args.precision {
        settings = settings.with_display_precision(precision);
    }

    let solver = BvpSolver::new(settings)?;
    let setup = args.problem.resolve();
    let solution = solver.solve(&setup.problem, setup.n)?;
    let polynomial = solver.fit(&solution, args.degree)?;

    let mut summary = FitSummary::new(&solver, &solution, &polynomial)?;
    if args.trim {
        let format = solver.settings().polynomial_format().trimmed().labeled("P(x)");
        summary.rendered = polynomial.render(&format);
    }

    let coefficients: Vec<CoefficientRow> = polynomial
        .coefficients()
        .iter()
        .enumerate()
        .map(|(power, &coefficient)| CoefficientRow { power, coefficient })
        .collect();
    let samples = sample_rows(&polynomial, setup.problem.x0, setup.problem.xk, args.samples)?;

    match format {
        OutputFormat::Table => {
            print_header("Polynomial Fit");
            print_output(&summary.rows(), format)?;
            if !quiet {
                print_header("Coefficients");
                print_output(&coefficients, format)?;
            }
            if !samples.is_empty() {
                print_header("Samples");
                print_output(&samples, format)?;
            }
        }
        OutputFormat::Json => {
            print_json(&FitReport { summary, samples })?;
        }
        OutputFormat::Csv => {
            if samples.is_empty() {
                print_output(&coefficients, format)?;
            } else {
                print_output(&samples, format)?;
            }
        }
        OutputFormat::Minimal => {
            println!("{}", summary.rendered);
        }
    }

    Ok(())
}
