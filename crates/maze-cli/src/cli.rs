//! CLI argument definitions for the maze builder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use maze_config::BackendKind;

#[derive(Parser)]
#[command(
    name = "maze",
    version,
    about = "Maze builder - validate dimensions and request mazes from an external generator",
    long_about = "Validate maze dimensions, call the external maze generator, and print\n\
                  the result sized for display.\n\n\
                  Bounds profiles, display tiers, and the generator transport come from\n\
                  maze.toml (see --config)."
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

    /// Configuration file (default: maze.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate WIDTH and HEIGHT and build one maze.
    Build(BuildArgs),

    /// Read "WIDTH HEIGHT" lines from stdin and build a maze for each.
    Interactive(InteractiveArgs),

    /// List the configured bounds profiles.
    Profiles(ProfilesArgs),

    /// List the display tiers and check them against a profile.
    Tiers(TiersArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Maze width, as typed.
    #[arg(value_name = "WIDTH", allow_hyphen_values = true)]
    pub width: String,

    /// Maze height, as typed.
    #[arg(value_name = "HEIGHT", allow_hyphen_values = true)]
    pub height: String,

    /// Bounds profile to validate against.
    #[arg(long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Also write the maze text to this file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct InteractiveArgs {
    /// Bounds profile to validate against.
    #[arg(long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

/// Overrides for the `[generator]` section of the configuration.
#[derive(Args, Default)]
pub struct GeneratorArgs {
    /// Generator transport.
    #[arg(long = "backend", value_enum)]
    pub backend: Option<BackendArg>,

    /// Program run by the process backend.
    #[arg(long = "program", value_name = "PROGRAM")]
    pub program: Option<String>,

    /// Argument passed to the program before WIDTH and HEIGHT (repeatable).
    ///
    /// Replaces the configured argument list when given at least once.
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Endpoint used by the http backend.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Seconds to wait for the generator.
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,
}

#[derive(Args)]
pub struct ProfilesArgs {
    /// Print the profiles as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct TiersArgs {
    /// Profile to check tier coverage against.
    #[arg(long = "profile", value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Process,
    Http,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Process => Self::Process,
            BackendArg::Http => Self::Http,
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
