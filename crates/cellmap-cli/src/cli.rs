//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cellmap",
    version,
    about = "Map wide-column rows into flat, named-field records",
    long_about = "Apply declaratively configured mapping rules to rows retrieved from a\n\
                  wide-column store, producing flat records suitable for indexing into a\n\
                  search engine."
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
    /// Apply a mapping configuration to a row dump and print the record.
    Apply(ApplyArgs),

    /// Show the compiled rules of a mapping configuration.
    Rules(RulesArgs),

    /// List the registered decoder type names.
    Decoders,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to the JSON mapping configuration.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Path to the row dump CSV (family,qualifier,value per line).
    #[arg(value_name = "CELLS")]
    pub cells: PathBuf,

    /// Treat the value column of the dump as hex-encoded binary.
    #[arg(long = "hex-values")]
    pub hex_values: bool,

    /// Also print the column targets registered during compilation.
    #[arg(long = "show-columns")]
    pub show_columns: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Path to the JSON mapping configuration.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
