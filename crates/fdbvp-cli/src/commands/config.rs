//! Config command implementation.
//!
//! Shows, lists, and checks solver settings.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use fdbvp_core::SolverSettings;

use crate::cli::OutputFormat;
use crate::commands::load_settings;
use crate::output::{print_header, print_json, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings as TOML
    Show,

    /// List available settings keys
    List,

    /// Check a settings file
    Check(CheckArgs),
}

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Settings file (TOML)
    pub file: PathBuf,
}

/// Settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey {
    Method,
    PivotTolerance,
    MaxFitDegree,
    DisplayPrecision,
}

impl ConfigKey {
    const ALL: [Self; 4] = [
        Self::Method,
        Self::PivotTolerance,
        Self::MaxFitDegree,
        Self::DisplayPrecision,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::PivotTolerance => "pivot_tolerance",
            Self::MaxFitDegree => "max_fit_degree",
            Self::DisplayPrecision => "display_precision",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Method => "Linear solver (thomas, dense)",
            Self::PivotTolerance => "Smallest accepted pivot magnitude",
            Self::MaxFitDegree => "Cap on the default fitted degree",
            Self::DisplayPrecision => "Decimals in rendered polynomials (0-15)",
        }
    }

    fn value(self, settings: &SolverSettings) -> String {
        match self {
            Self::Method => settings.method.to_string(),
            Self::PivotTolerance => format!("{:e}", settings.pivot_tolerance),
            Self::MaxFitDegree => settings.max_fit_degree.to_string(),
            Self::DisplayPrecision => settings.display_precision.to_string(),
        }
    }
}

/// A settings key with its default value.
#[derive(Debug, Serialize, Tabled)]
struct KeyInfo {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, settings: SolverSettings, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(&settings, format),
        ConfigCommand::List => list(format),
        ConfigCommand::Check(check) => {
            let loaded = load_settings(Some(check.file.as_path()))?;
            match format {
                OutputFormat::Json => print_json(&loaded)?,
                _ => print_success(&format!("{} is valid", check.file.display())),
            }
            Ok(())
        }
    }
}

fn show(settings: &SolverSettings, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(settings),
        OutputFormat::Csv => {
            let rows: Vec<KeyValue> = ConfigKey::ALL
                .iter()
                .map(|key| KeyValue::new(key.as_str(), key.value(settings)))
                .collect();
            print_output(&rows, format)
        }
        OutputFormat::Table | OutputFormat::Minimal => {
            print!("{}", settings.to_toml_string()?);
            Ok(())
        }
    }
}

fn list(format: OutputFormat) -> Result<()> {
    let defaults = SolverSettings::default();
    let keys: Vec<KeyInfo> = ConfigKey::ALL
        .iter()
        .map(|&key| KeyInfo {
            key: key.as_str(),
            default: key.value(&defaults),
            description: key.description(),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header("Settings Keys");
    }
    print_output(&keys, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_values_follow_settings() {
        let settings = SolverSettings::default().with_max_fit_degree(3);
        assert_eq!(ConfigKey::MaxFitDegree.value(&settings), "3");
        assert_eq!(ConfigKey::Method.value(&settings), "thomas");
        assert_eq!(ConfigKey::PivotTolerance.value(&settings), "1e-14");
    }
}
