use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum EnumerableLevelFilter {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<EnumerableLevelFilter> for LevelFilter {
    fn from(value: EnumerableLevelFilter) -> Self {
        match value {
            EnumerableLevelFilter::Off => LevelFilter::Off,
            EnumerableLevelFilter::Error => LevelFilter::Error,
            EnumerableLevelFilter::Warn => LevelFilter::Warn,
            EnumerableLevelFilter::Info => LevelFilter::Info,
            EnumerableLevelFilter::Debug => LevelFilter::Debug,
            EnumerableLevelFilter::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parse and inspect Fift assembly listings.
pub struct CliArgs {
    /// Filter log messages more verbose than the given level.
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn"
    )]
    pub log_level: EnumerableLevelFilter,
    /// Override log filters using RUST_LOG directives supported by the env_logger crate.
    #[arg(short = 'f', long, global = true, value_name = "FILTERS")]
    pub log_filter: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
/// Holds the supported subcommands and their args.
pub enum Command {
    /// Print the syntax tree of a file as an S-expression.
    Parse(FileArgs),
    /// Check that every given file parses.
    Check(CheckArgs),
    /// Print where the procedure under the cursor is defined.
    Definition(PositionArgs),
    /// Print every call of the procedure under the cursor.
    References(ReferencesArgs),
    /// Print hover documentation for the procedure under the cursor.
    Hover(PositionArgs),
    /// Print the foldable regions of a file.
    Folds(FileArgs),
    /// Print the semantic highlighting tokens of a file.
    Tokens(FileArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// The path to a Fift source file
    #[arg(required = true)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Paths to the Fift source files to check
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct PositionArgs {
    /// The path to a Fift source file
    pub file: PathBuf,
    /// One-based line of the cursor
    pub line: usize,
    /// One-based column of the cursor
    pub column: usize,
}

#[derive(Args)]
pub struct ReferencesArgs {
    #[command(flatten)]
    pub position: PositionArgs,
    /// Also print the definition itself.
    #[arg(short, long)]
    pub include_definition: bool,
}

pub fn parse_cli_args() -> CliArgs {
    CliArgs::parse()
}
