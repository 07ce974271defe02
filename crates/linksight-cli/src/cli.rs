//! CLI argument definitions for the LinkSight resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "linksight",
    version,
    about = "LinkSight - Resolve free-text locations to standard geographic codes",
    long_about = "Resolve free-text administrative locations to reference codes.\n\n\
                  Each hierarchy level is fuzzy-matched against the reference table,\n\
                  narrowed by the codes matched at the level above. Blank or unmatched\n\
                  levels are reconstructed from their resolved neighbours."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow raw address values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve every record of a dataset.
    Match(MatchArgs),

    /// Show the configured hierarchy levels.
    Levels(LevelsArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// CSV file of input records.
    #[arg(long = "dataset", value_name = "CSV")]
    pub dataset: PathBuf,

    /// Reference table (default: bundled PSGC sample).
    #[arg(long = "reference", value_name = "CSV")]
    pub reference: Option<PathBuf>,

    /// Hierarchy configuration (default: bundled hierarchy.toml).
    #[arg(long = "hierarchy", value_name = "TOML")]
    pub hierarchy: Option<PathBuf>,

    /// Column holding record identifiers (default: zero-based row index).
    #[arg(long = "id-column", value_name = "NAME")]
    pub id_column: Option<String>,

    /// Where to write candidate rows (default: stdout).
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Write one canonical match per resolvable record.
    #[arg(long = "canonical", value_name = "CSV")]
    pub canonical: Option<PathBuf>,

    /// JSON object mapping record id to the chosen candidate index.
    #[arg(long = "choices", value_name = "JSON", requires = "canonical")]
    pub choices: Option<PathBuf>,

    /// Minimum similarity score, 0-100 (overrides the config).
    #[arg(long = "cutoff", value_name = "N")]
    pub cutoff: Option<u8>,

    /// Maximum candidates per level (overrides the config).
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct LevelsArgs {
    /// Hierarchy configuration (default: bundled hierarchy.toml).
    #[arg(long = "hierarchy", value_name = "TOML")]
    pub hierarchy: Option<PathBuf>,
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
