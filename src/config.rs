//! Command line and environment configuration.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;

pub const WIDE_DEFAULT_DATA: &str = "cleaned_lab_reports_no_pii_combined.csv";
pub const LONG_DEFAULT_DATA: &str = "cleaned_lab_reports_no_pii_combined_long.csv";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Preview rows must be at least 1")]
    NoPreviewRows,
}

/// Shape of the input CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    /// One row per record, any flat schema
    #[default]
    Wide,
    /// One row per patient x medical attribute
    Long,
}

#[derive(Parser, Debug)]
#[command(name = "labscope")]
#[command(about = "Lab report CSV dashboard")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "CSV file to load (defaults depend on --layout)")]
    pub data: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Layout::Wide, help = "Dataset layout")]
    pub layout: Layout,

    #[arg(
        long,
        env = "LABSCOPE_PASSWORD",
        hide_env_values = true,
        help = "Shared dashboard password. If not set, the dashboard is open."
    )]
    pub password: Option<String>,

    #[arg(long, help = "Print the summary and chart of this column as JSON and exit")]
    pub column: Option<String>,

    #[arg(long, default_value = "5", help = "Rows shown in the sample data preview")]
    pub preview_rows: usize,

    #[arg(short, long, help = "Verbose output")]
    pub verbose: bool,
}

/// Validated dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub layout: Layout,
    pub password: Option<String>,
    pub preview_rows: usize,
}

impl DashboardConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.password.as_deref() == Some("") {
            return Err(ConfigError::EmptyPassword);
        }
        if cli.preview_rows == 0 {
            return Err(ConfigError::NoPreviewRows);
        }

        let data_path = cli.data.clone().unwrap_or_else(|| {
            PathBuf::from(match cli.layout {
                Layout::Wide => WIDE_DEFAULT_DATA,
                Layout::Long => LONG_DEFAULT_DATA,
            })
        });

        Ok(Self {
            data_path,
            layout: cli.layout,
            password: cli.password.clone(),
            preview_rows: cli.preview_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("labscope").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_follow_layout() {
        let config = DashboardConfig::from_cli(&parse(&["--layout", "long"])).unwrap();
        assert_eq!(config.layout, Layout::Long);
        assert_eq!(config.data_path, PathBuf::from(LONG_DEFAULT_DATA));
        assert_eq!(config.preview_rows, 5);

        let config = DashboardConfig::from_cli(&parse(&["--data", "labs.csv"])).unwrap();
        assert_eq!(config.layout, Layout::Wide);
        assert_eq!(config.data_path, PathBuf::from("labs.csv"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert_eq!(
            DashboardConfig::from_cli(&parse(&["--password", ""])),
            Err(ConfigError::EmptyPassword)
        );
        assert_eq!(
            DashboardConfig::from_cli(&parse(&["--preview-rows", "0"])),
            Err(ConfigError::NoPreviewRows)
        );
        assert!(Cli::try_parse_from(["labscope", "--layout", "tall"]).is_err());
    }

    #[test]
    fn test_password_from_flag() {
        let config = DashboardConfig::from_cli(&parse(&["--password", "s3cret"])).unwrap();
        assert_eq!(config.password.as_deref(), Some("s3cret"));
    }
}
