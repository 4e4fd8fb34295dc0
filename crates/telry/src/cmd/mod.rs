use clap::{Args, Subcommand};
use std::path::PathBuf;

use telry_log::ReadOptions;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod dump;
pub mod info;
pub mod record;
pub mod verify;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate telemetry and record it to a log file.
    Record(RecordArgs),
    /// Decode a log file and print its telemetry frames.
    Dump(DumpArgs),
    /// Walk a log file, checking framing and checksums.
    Verify(VerifyArgs),
    /// Show a log file's header fields and record statistics.
    Info(InfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Record(args) => record::run(args, format),
        Command::Dump(args) => dump::run(args, format),
        Command::Verify(args) => verify::run(args, format),
        Command::Info(args) => info::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Log file to write.
    pub path: PathBuf,
    /// Number of frames to record.
    #[arg(long, short = 'n', default_value_t = 1000)]
    pub count: u64,
    /// Simulation seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Simulated time between frames, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub step_ms: u64,
    /// Timestamp of the first frame, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub start_time_ms: u64,
    /// Append to an existing log instead of overwriting it.
    #[arg(long)]
    pub append: bool,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Log file to read.
    pub path: PathBuf,
    /// Stop after this many frames.
    #[arg(long, short = 'l')]
    pub limit: Option<u64>,
    /// Reject records whose size field exceeds this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_packet_size: Option<usize>,
    /// Show temperatures in Fahrenheit and distances in feet
    /// (table and pretty output; JSON stays metric).
    #[arg(long)]
    pub imperial: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Log file to check.
    pub path: PathBuf,
    /// Reject records whose size field exceeds this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_packet_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Log file to inspect.
    pub path: PathBuf,
}

/// A cap below 4 would reject even an empty record.
fn read_options(max_packet_size: Option<usize>) -> CliResult<ReadOptions> {
    match max_packet_size {
        None => Ok(ReadOptions::default()),
        Some(max) if max >= 4 => Ok(ReadOptions {
            max_packet_size: max,
        }),
        Some(max) => Err(CliError::new(
            USAGE,
            format!("--max-packet-size must be at least 4, got {max}"),
        )),
    }
}
