// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `assetdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "assetdag",
    version,
    about = "Build, validate and lay out an asset dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the asset-record snapshot (JSON array of records).
    #[arg(long, value_name = "PATH", default_value = "assets.json")]
    pub records: String,

    /// Path to step execution metadata (states + log-capture groups).
    ///
    /// If omitted, no statuses are computed.
    #[arg(long, value_name = "PATH")]
    pub steps: Option<String>,

    /// Restrict the graph to assets whose owning job matches this glob.
    ///
    /// Dependencies crossing the filter boundary show up as foreign
    /// placeholder nodes. An empty pattern or `*` keeps everything.
    #[arg(long, value_name = "GLOB")]
    pub job: Option<String>,

    /// Path to a TOML file overriding the layout geometry defaults.
    #[arg(long, value_name = "PATH")]
    pub layout_config: Option<String>,

    /// Two node ids; the connecting path between them is appended to the
    /// output (range selection).
    #[arg(long, value_names = ["FROM", "TO"], num_args = 2)]
    pub select: Option<Vec<String>>,

    /// Keep watching the input files and reprint the view on every change.
    #[arg(long)]
    pub watch: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ASSETDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
