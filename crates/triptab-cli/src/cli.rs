//! CLI argument definitions for the scenario validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "triptab",
    version,
    about = "Validate and normalize trips/legs/links scenario tables",
    long_about = "Validate transport-simulation scenario tables against the built-in\n\
                  trips/legs/links schema catalog: coerce cell types, fill in missing\n\
                  identifiers, and check referential integrity across the three tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a scenario and print the findings.
    Check(CheckArgs),

    /// Print the built-in schema catalog.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the trips table (CSV, or JSON array of row objects).
    #[arg(value_name = "TRIPS")]
    pub trips: PathBuf,

    /// Path to the legs table.
    #[arg(value_name = "LEGS")]
    pub legs: PathBuf,

    /// Path to the links table.
    #[arg(value_name = "LINKS")]
    pub links: PathBuf,

    /// Drop columns the schema does not declare instead of keeping them.
    #[arg(long = "drop-unknown-columns")]
    pub drop_unknown_columns: bool,

    /// Separator used when splitting textual list cells.
    #[arg(long = "list-separator", default_value = ",")]
    pub list_separator: String,

    /// Comma-separated transit modes whose links rows must reference a line.
    #[arg(long = "pt-modes", value_name = "MODES")]
    pub pt_modes: Option<String>,

    /// Load a schema catalog from a file instead of the built-in one.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Write the full validation report as JSON to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Limit output to one table (trips, legs or links).
    #[arg(long = "table", value_name = "TABLE")]
    pub table: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
