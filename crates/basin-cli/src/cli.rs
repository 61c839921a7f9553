//! CLI argument definitions for the sub-basin explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "subbasin-explorer",
    version,
    about = "Sub-basin project explorer - validate and open hydrological projects",
    long_about = "Validate hydrological sub-basin projects and manage the last opened\n\
                  selection.\n\n\
                  Supports the modern bundle layout (GeoPackage + SQLite measurement\n\
                  store) and the legacy folder layout (shapefiles + CSV)."
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
    /// Validate a project and print the report.
    Check(CheckArgs),

    /// Validate a project, persist it as the last opened selection and hand
    /// it to the explorer.
    Open(ProjectArgs),

    /// Show the stored last-opened selection.
    Last,

    /// Forget the stored selection.
    Clear,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Emit the report as a JSON payload instead of text.
    #[arg(long = "json")]
    pub json: bool,
}

/// Either the two bundle paths or the legacy folder triple.
#[derive(Args)]
pub struct ProjectArgs {
    /// GeoPackage file of a modern bundle project.
    #[arg(long = "geopackage", value_name = "FILE", requires = "sqlite")]
    pub geopackage: Option<PathBuf>,

    /// Embedded SQLite measurement store of a modern bundle project.
    #[arg(long = "sqlite", value_name = "FILE", requires = "geopackage")]
    pub sqlite: Option<PathBuf>,

    /// Root directory of a legacy folder project.
    #[arg(
        long = "legacy-root",
        value_name = "DIR",
        conflicts_with_all = ["geopackage", "sqlite"]
    )]
    pub legacy_root: Option<PathBuf>,

    /// Identifier attribute name in the sub-basin shapefile (legacy layout).
    #[arg(long = "shp-id-field", value_name = "NAME", requires = "legacy_root")]
    pub shp_id_field: Option<String>,

    /// Identifier column name in the sub-basins CSV (legacy layout).
    #[arg(long = "csv-id-column", value_name = "NAME", requires = "legacy_root")]
    pub csv_id_column: Option<String>,
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
