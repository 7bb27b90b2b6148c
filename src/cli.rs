//! CLI argument parsing for rollbook

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for `--report`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(version)]
#[command(about = "Student roster with attendance tracking and pass/fail thresholds", long_about = None)]
pub struct Cli {
    /// Roster file to load and save (default: students.csv)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Initial pass threshold percentage (0-100)
    #[arg(short = 't', long = "threshold", value_name = "PCT")]
    pub threshold: Option<f64>,

    /// Configuration file (default: rollbook.toml if present)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Refuse to start if the roster file has malformed lines
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print all students sorted by attendance and exit without the menu
    #[arg(short = 'r', long = "report")]
    pub report: bool,

    /// Output format for --report
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
