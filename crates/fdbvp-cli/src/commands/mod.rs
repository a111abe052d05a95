//! CLI command implementations.

pub mod compare;
pub mod config;
pub mod fit;
pub mod solve;

// Re-export submodules for convenience
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use fit::FitArgs;
pub use solve::SolveArgs;

use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use fdbvp_core::{LinearBvp, Polynomial, PolynomialFormat, SolverSettings};

use crate::error::{CliError, CliResult};
use crate::output::KeyValue;

/// A problem whose coefficients are canonical polynomials.
pub type PolynomialBvp = LinearBvp<Polynomial, Polynomial, Polynomial>;

/// Built-in problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// y'' - x·y' + x²·y = 2x + 1 on [1, 2], y(1) = 0, y(2) = 2
    #[default]
    Variant,
    /// y'' = 0 on [0, 1], y(0) = 0, y(1) = 1 (exact: x)
    Linear,
    /// y'' + y = 0 on [0, π/2], y(0) = 0, y(π/2) = 1 (exact: sin x)
    Harmonic,
}

/// Every value a preset supplies.
struct PresetDefinition {
    p: Vec<f64>,
    q: Vec<f64>,
    f: Vec<f64>,
    interval: (f64, f64),
    boundary: (f64, f64),
    n: usize,
    exact: Option<fn(f64) -> f64>,
}

impl Preset {
    fn definition(self) -> PresetDefinition {
        match self {
            Self::Variant => PresetDefinition {
                p: vec![0.0, -1.0],
                q: vec![0.0, 0.0, 1.0],
                f: vec![1.0, 2.0],
                interval: (1.0, 2.0),
                boundary: (0.0, 2.0),
                n: 8,
                exact: None,
            },
            Self::Linear => PresetDefinition {
                p: vec![0.0],
                q: vec![0.0],
                f: vec![0.0],
                interval: (0.0, 1.0),
                boundary: (0.0, 1.0),
                n: 4,
                exact: Some(|x| x),
            },
            Self::Harmonic => PresetDefinition {
                p: vec![0.0],
                q: vec![1.0],
                f: vec![0.0],
                interval: (0.0, FRAC_PI_2),
                boundary: (0.0, 1.0),
                n: 16,
                exact: Some(f64::sin),
            },
        }
    }
}

/// Problem selection shared by every solving command.
#[derive(Args, Debug)]
pub struct ProblemArgs {
    /// Built-in problem supplying every value not given explicitly
    #[arg(long, value_enum, default_value = "variant")]
    pub preset: Preset,

    /// Coefficient p(x) of y', lowest power first (e.g. 0,-1 for -x)
    #[arg(long = "p", value_parser = parse_coefficients, allow_hyphen_values = true)]
    pub p: Option<Polynomial>,

    /// Coefficient q(x) of y, lowest power first
    #[arg(long = "q", value_parser = parse_coefficients, allow_hyphen_values = true)]
    pub q: Option<Polynomial>,

    /// Right-hand side f(x), lowest power first
    #[arg(long = "f", value_parser = parse_coefficients, allow_hyphen_values = true)]
    pub f: Option<Polynomial>,

    /// Left end of the interval
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,

    /// Right end of the interval
    #[arg(long, allow_negative_numbers = true)]
    pub xk: Option<f64>,

    /// Boundary value y(x0)
    #[arg(long, allow_negative_numbers = true)]
    pub y0: Option<f64>,

    /// Boundary value y(xk)
    #[arg(long, allow_negative_numbers = true)]
    pub yk: Option<f64>,

    /// Number of grid intervals
    #[arg(short, long)]
    pub n: Option<usize>,
}

/// A fully resolved problem.
pub struct ProblemSetup {
    /// The problem to solve.
    pub problem: PolynomialBvp,
    /// Number of grid intervals.
    pub n: usize,
    /// Closed-form solution, when the preset has one and nothing overrides it.
    pub exact: Option<fn(f64) -> f64>,
}

impl ProblemArgs {
    /// Merges explicit values over the preset.
    pub fn resolve(&self) -> ProblemSetup {
        let preset = self.preset.definition();
        let overridden = self.p.is_some()
            || self.q.is_some()
            || self.f.is_some()
            || self.x0.is_some()
            || self.xk.is_some()
            || self.y0.is_some()
            || self.yk.is_some();

        let problem = LinearBvp::new(
            self.p.clone().unwrap_or_else(|| Polynomial::new(preset.p)),
            self.q.clone().unwrap_or_else(|| Polynomial::new(preset.q)),
            self.f.clone().unwrap_or_else(|| Polynomial::new(preset.f)),
        )
        .on_interval(
            self.x0.unwrap_or(preset.interval.0),
            self.xk.unwrap_or(preset.interval.1),
        )
        .with_boundary(
            self.y0.unwrap_or(preset.boundary.0),
            self.yk.unwrap_or(preset.boundary.1),
        );

        ProblemSetup {
            problem,
            n: self.n.unwrap_or(preset.n),
            exact: if overridden { None } else { preset.exact },
        }
    }
}

impl ProblemSetup {
    /// Key-value description of the problem.
    pub fn describe(&self) -> Vec<KeyValue> {
        let format = PolynomialFormat::default().trimmed();
        let problem = &self.problem;
        vec![
            KeyValue::new("Equation", "y'' + p(x)·y' + q(x)·y = f(x)"),
            KeyValue::new("p(x)", problem.p.render(&format)),
            KeyValue::new("q(x)", problem.q.render(&format)),
            KeyValue::new("f(x)", problem.f.render(&format)),
            KeyValue::new("Interval", format!("[{}, {}]", problem.x0, problem.xk)),
            KeyValue::new(
                "Boundary",
                format!("y({}) = {}, y({}) = {}", problem.x0, problem.boundary.y0, problem.xk, problem.boundary.yk),
            ),
            KeyValue::new("Intervals", self.n.to_string()),
        ]
    }
}

/// One grid node of a solution.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct NodeRow {
    #[tabled(rename = "i")]
    pub index: usize,
    #[tabled(rename = "x", display_with = "format_value")]
    pub x: f64,
    #[tabled(rename = "y", display_with = "format_value")]
    pub y: f64,
    #[tabled(rename = "Exact", display_with = "format_optional")]
    pub exact: Option<f64>,
    #[tabled(rename = "Error", display_with = "format_optional")]
    pub error: Option<f64>,
}

impl NodeRow {
    /// Builds rows from `(x, y)` pairs, adding exact values when known.
    pub fn from_points(
        points: impl Iterator<Item = (f64, f64)>,
        exact: Option<fn(f64) -> f64>,
    ) -> Vec<Self> {
        points
            .enumerate()
            .map(|(index, (x, y))| {
                let exact = exact.map(|solution| solution(x));
                Self {
                    index,
                    x,
                    y,
                    exact,
                    error: exact.map(|e| (y - e).abs()),
                }
            })
            .collect()
    }
}

/// Formats a table value.
pub fn format_value(value: &f64) -> String {
    format!("{value:.8}")
}

fn format_optional(value: &Option<f64>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), format_value)
}

/// Parses a comma-separated coefficient list, lowest power first.
pub fn parse_coefficients(s: &str) -> CliResult<Polynomial> {
    let coefficients = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| CliError::InvalidCoefficients(s.to_string()))?;

    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(CliError::InvalidCoefficients(s.to_string()));
    }
    Ok(Polynomial::new(coefficients))
}

/// Loads settings from `path`, or the defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> CliResult<SolverSettings> {
    match path {
        Some(path) => {
            SolverSettings::from_file(path).map_err(|e| CliError::Config(e.to_string()))
        }
        None => Ok(SolverSettings::default()),
    }
}
