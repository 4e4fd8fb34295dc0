mod cmd;
mod exit;
mod logging;
mod output;
mod units;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "telry", version, about = "Telemetry log recorder and inspector")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record_subcommand() {
        let cli = Cli::try_parse_from([
            "telry",
            "record",
            "/tmp/session.bin",
            "--count",
            "10",
            "--seed",
            "7",
        ])
        .expect("record args should parse");

        assert!(matches!(cli.command, Command::Record(_)));
    }

    #[test]
    fn parses_dump_with_limit_and_imperial() {
        let cli = Cli::try_parse_from([
            "telry",
            "dump",
            "/tmp/session.bin",
            "--limit",
            "3",
            "--imperial",
        ])
        .expect("dump args should parse");

        match cli.command {
            Command::Dump(args) => {
                assert_eq!(args.limit, Some(3));
                assert!(args.imperial);
            }
            other => panic!("expected dump, got {other:?}"),
        }
    }

    #[test]
    fn parses_verify_with_packet_cap() {
        let cli = Cli::try_parse_from([
            "telry",
            "verify",
            "/tmp/session.bin",
            "--max-packet-size",
            "1024",
        ])
        .expect("verify args should parse");

        assert!(matches!(cli.command, Command::Verify(_)));
    }

    #[test]
    fn parses_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "telry",
            "--log-level",
            "debug",
            "--format",
            "json",
            "info",
            "/tmp/session.bin",
        ])
        .expect("global flags should parse");

        assert!(matches!(cli.command, Command::Info(_)));
        assert!(cli.format.is_some());
    }

    #[test]
    fn rejects_non_numeric_count() {
        let err = Cli::try_parse_from(["telry", "record", "/tmp/session.bin", "--count", "many"])
            .expect_err("non-numeric count should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
