//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CompareArgs, ConfigArgs, FitArgs, SolveArgs};

/// fdbvp - Finite-difference solver for linear boundary-value problems
#[derive(Parser)]
#[command(name = "fdbvp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Solver settings file (TOML)
    #[arg(short, long, global = true, env = "FDBVP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Solve a boundary-value problem and fit a polynomial to the solution
    Solve(SolveArgs),

    /// Solve with both the Thomas and dense methods and compare
    Compare(CompareArgs),

    /// Fit a polynomial to the solution and sample it
    Fit(FitArgs),

    /// Show or check solver settings
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (values only)
    Minimal,
}
