//! CLI argument definitions for the dashboard replay tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bi-designer",
    version,
    about = "BI Designer - Replay filter interactions against a declarative dashboard",
    long_about = "Replay scripted filter interactions against a declarative dashboard\n\
                  configuration and inspect the resulting filter state, pending\n\
                  scopes, and dispatched fetch parameters."
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
    /// Replay an event script against a dashboard configuration.
    Run(RunArgs),

    /// Audit a dashboard configuration without replaying anything.
    Check(CheckArgs),

    /// List all registered component types.
    Components,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the dashboard JSON configuration.
    #[arg(value_name = "DASHBOARD")]
    pub dashboard: PathBuf,

    /// Path to the event script (JSON list of filter changes and scope
    /// submissions).
    #[arg(long = "events", value_name = "PATH")]
    pub events: PathBuf,

    /// Emit the replay outcome as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the dashboard JSON configuration.
    #[arg(value_name = "DASHBOARD")]
    pub dashboard: PathBuf,
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
