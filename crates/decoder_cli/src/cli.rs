use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use decoder_logging::LogDestination;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(
    name = "wubdecode",
    author,
    version,
    about = "Decode marker-separated token sequences",
    long_about = "Decode sequences whose tokens are separated by runs of a marker \
                  (default WUB) into uppercase, single-space separated text."
)]
pub struct Cli {
    /// Encoded sequences to decode, one result per argument. Reads --file or stdin when omitted
    pub inputs: Vec<String>,

    /// Read the encoded input from a file
    #[arg(short, long, conflicts_with = "inputs")]
    pub file: Option<PathBuf>,

    /// Marker separating tokens (case-insensitive)
    #[arg(short, long, env = "WUBDECODE_MARKER")]
    pub marker: Option<String>,

    /// Decode every input line as its own sequence
    #[arg(short, long)]
    pub lines: bool,

    /// Keep whitespace-only lines as empty outputs (with --lines)
    #[arg(long)]
    pub keep_blank: bool,

    /// Input encoding label, e.g. latin1 or utf-16le
    #[arg(long)]
    pub encoding: Option<String>,

    /// Write decoded.txt into this directory instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write report.json next to decoded.txt
    #[arg(long, requires = "output")]
    pub report: bool,

    /// Settings file; defaults to ./wubdecode.ron when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where log records go
    #[arg(long, value_enum)]
    pub log: Option<LogChoice>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogChoice {
    Off,
    Terminal,
    File,
    Both,
}

impl From<LogChoice> for LogDestination {
    fn from(choice: LogChoice) -> Self {
        match choice {
            LogChoice::Off => LogDestination::Off,
            LogChoice::Terminal => LogDestination::Terminal,
            LogChoice::File => LogDestination::File,
            LogChoice::Both => LogDestination::Both,
        }
    }
}
