//! CLI argument definitions for `chomfy`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "chomfy",
    version,
    about = "Stateful prompt line nodes on the command line",
    long_about = "Run the chomfy prompt nodes outside the host.\n\n\
                  Each stateful subcommand keeps one node instance for the whole \
                  run, so --repeat N behaves like N evaluations of the same node."
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

    /// Log output format (defaults to the settings file, then pretty).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// How results are printed.
    #[arg(long = "output", value_enum, default_value = "table", global = true)]
    pub output: OutputArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Step through the lines of one file.
    Next(NextArgs),

    /// Print a single line of a file.
    Line(LineArgs),

    /// Emit an arithmetic progression.
    Count(CountArgs),

    /// Build prompts from one line of each of several files.
    Compose(ComposeArgs),
}

#[derive(Args)]
pub struct NextArgs {
    /// Source file (.txt, .log, .md, .csv or .docx).
    #[arg(value_name = "FILE")]
    pub file: String,

    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub start: i64,

    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub step: i64,

    /// Number of lines before the sequence is done (-1 for endless).
    #[arg(long = "max-steps", default_value_t = -1, allow_hyphen_values = true)]
    pub max_steps: i64,

    /// Restart from the first line once the sequence is done.
    #[arg(long = "auto-reset")]
    pub auto_reset: bool,

    /// CSV column to read (whole rows when omitted).
    #[arg(long, default_value = "")]
    pub column: String,

    /// Keep surrounding whitespace.
    #[arg(long = "no-strip")]
    pub no_strip: bool,

    #[command(flatten)]
    pub repeat: RepeatArgs,
}

#[derive(Args)]
pub struct LineArgs {
    #[arg(value_name = "FILE")]
    pub file: String,

    /// 1-based line number; out-of-range values wrap around.
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub index: i64,

    #[arg(long, default_value = "")]
    pub column: String,

    #[arg(long = "no-strip")]
    pub no_strip: bool,
}

#[derive(Args)]
pub struct CountArgs {
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub start: f64,

    /// Increment per value; may be negative or fractional.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub step: f64,

    #[arg(long = "max-steps", default_value_t = -1, allow_hyphen_values = true)]
    pub max_steps: i64,

    #[arg(long = "auto-reset")]
    pub auto_reset: bool,

    #[command(flatten)]
    pub repeat: RepeatArgs,
}

#[derive(Args)]
pub struct ComposeArgs {
    /// Source files, each optionally suffixed with `::column`.
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Where the source list comes from (MANUAL, CONFIG_FILE, DIRECTORY).
    #[arg(long)]
    pub mode: Option<String>,

    /// How a line is picked from each source (RANDOM, SEQUENTIAL).
    #[arg(long)]
    pub selection: Option<String>,

    /// Manifest listing one source per line (CONFIG_FILE mode).
    #[arg(long, value_name = "PATH", default_value = "")]
    pub manifest: String,

    /// Directory to scan (DIRECTORY mode).
    #[arg(long = "dir", value_name = "PATH", default_value = "")]
    pub directory: String,

    /// Glob matched against paths relative to --dir.
    #[arg(long)]
    pub glob: Option<String>,

    #[arg(long = "max-files")]
    pub max_files: Option<i64>,

    /// Text placed before the matching source; repeat for each position.
    #[arg(long = "insert", value_name = "TEXT")]
    pub inserts: Vec<String>,

    #[arg(long, default_value = "")]
    pub prefix: String,

    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Default CSV column for sources without a `::column` suffix.
    #[arg(long, default_value = "")]
    pub column: String,

    /// Seed for random selection (negative for unseeded).
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i64>,

    /// Concatenate parts without spaces.
    #[arg(long = "no-auto-space")]
    pub no_auto_space: bool,

    #[arg(long = "no-strip")]
    pub no_strip: bool,

    /// Keep blank lines as selectable records.
    #[arg(long = "keep-blank")]
    pub keep_blank: bool,

    #[command(flatten)]
    pub repeat: RepeatArgs,
}

#[derive(Args, Clone, Copy)]
pub struct RepeatArgs {
    /// Number of evaluations against the same node instance.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Reset the node on every evaluation.
    #[arg(long)]
    pub reset: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
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
