//! fdbvp CLI - finite-difference solver for linear boundary-value problems.
//!
//! # Usage
//!
//! ```bash
//! # Solve the default problem and fit a polynomial
//! fdbvp solve
//!
//! # y'' + y = 0 on [0, π/2] with 32 intervals, dense solver
//! fdbvp solve --preset harmonic -n 32 --method dense
//!
//! # Custom coefficients, lowest power first: p(x) = -x, q(x) = x², f(x) = 1 + 2x
//! fdbvp solve --p 0,-1 --q 0,0,1 --f 1,2 --x0 1 --xk 2 --y0 0 --yk 2
//!
//! # Cross-check the Thomas and dense solvers
//! fdbvp compare --preset variant
//!
//! # Fit and sample the approximating polynomial
//! fdbvp fit --degree 3 --samples 20
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, settings, format, cli.quiet)?,
        Commands::Compare(args) => commands::compare::execute(args, settings, format, cli.quiet)?,
        Commands::Fit(args) => commands::fit::execute(args, settings, format, cli.quiet)?,
        Commands::Config(args) => commands::config::execute(args, settings, format)?,
    }

    Ok(())
}
