//! Command-line arguments for `ais`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ais_catalog::AssetType;
use ais_ingest::DEFAULT_PATTERN;

#[derive(Parser)]
#[command(
    name = "ais",
    version,
    about = "Asset Import Studio - Normalize localized asset inventory CSV files",
    long_about = "Convert spreadsheet exports with localized headers and values into\n\
                  canonical CSV files ready for import.\n\n\
                  Handles legacy encodings (GBK, GB18030, Big5, UTF-16), mixed\n\
                  delimiters, and reports every file's outcome."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Mapping catalog JSON (defaults to the built-in catalog).
    #[arg(long = "mapping", value_name = "PATH", global = true)]
    pub mapping: Option<PathBuf>,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Fix encodings and convert every matching file in a directory.
    Process(ProcessArgs),

    /// Validate every converted file in a directory.
    ValidateDir {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Convert headers and values of a single UTF-8 file.
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        #[arg(long = "type", value_enum, default_value = "assets")]
        asset_type: AssetTypeArg,
    },

    /// Print a structural validation report for one file.
    Validate {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Write a template with localized headers and one example row.
    Template {
        #[arg(value_name = "TYPE", value_enum)]
        asset_type: AssetTypeArg,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Encoding tools.
    #[command(subcommand)]
    Encoding(EncodingCommand),
}

#[derive(Args)]
pub struct ProcessArgs {
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Asset type of every file in the batch.
    #[arg(long = "type", value_enum, default_value = "assets")]
    pub asset_type: AssetTypeArg,

    /// File-name glob for input discovery.
    #[arg(long = "pattern", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Report path (default: <OUTPUT_DIR>/conversion_report.txt).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum EncodingCommand {
    /// Guess the encoding of a file.
    Detect {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Check that a file is UTF-8 and count CJK characters.
    Validate {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Re-encode a file as UTF-8.
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Source encoding label (detected when omitted).
        #[arg(long = "encoding", value_name = "LABEL")]
        encoding: Option<String>,
    },

    /// Re-encode a CSV file as UTF-8 and check that it parses.
    Fix {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Strip a UTF-8 byte-order mark in place.
    RemoveBom {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AssetTypeArg {
    Assets,
    Users,
    Accessories,
    Consumables,
    Licenses,
    Components,
}

impl From<AssetTypeArg> for AssetType {
    fn from(arg: AssetTypeArg) -> Self {
        match arg {
            AssetTypeArg::Assets => AssetType::Assets,
            AssetTypeArg::Users => AssetType::Users,
            AssetTypeArg::Accessories => AssetType::Accessories,
            AssetTypeArg::Consumables => AssetType::Consumables,
            AssetTypeArg::Licenses => AssetType::Licenses,
            AssetTypeArg::Components => AssetType::Components,
        }
    }
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
