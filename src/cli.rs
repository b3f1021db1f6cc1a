//! CLI Argument Parsing
//!
//! Two positional paths, always. Flags only tune how the run looks and how
//! patiently the child is shut down.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

/// Usage line printed on a wrong argument count
pub const USAGE: &str = "stagehand <project_dir> <output_dir>";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Stagehand - build a server binary, stage it with its assets, and run it
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(version, about, long_about = None)]
#[command(override_usage = USAGE)]
pub struct Cli {
    /// Project directory containing Cargo.toml
    pub project_dir: PathBuf,

    /// Directory to stage the executable and asset bundles into
    pub output_dir: PathBuf,

    /// Color output: auto, always, never
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Seconds to wait after Ctrl+C before killing the child (0 waits forever)
    #[arg(long, value_name = "SECS")]
    pub grace_period: Option<u64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Errors that mean "wrong number of positional arguments"
pub fn is_arity_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument | ErrorKind::TooManyValues | ErrorKind::UnknownArgument
    )
}
