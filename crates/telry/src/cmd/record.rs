use serde::Serialize;
use telry_log::{LogWriter, OpenMode};
use telry_sim::{SimConfig, TelemetrySimulator};

use crate::cmd::RecordArgs;
use crate::exit::{write_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct RecordOutput<'a> {
    path: &'a str,
    frames: u64,
    seed: u64,
    step_ms: u64,
    appended: bool,
}

pub fn run(args: RecordArgs, format: OutputFormat) -> CliResult<i32> {
    let config = SimConfig {
        start_time_ms: args.start_time_ms,
        step_ms: args.step_ms,
        packet_count: args.count,
        seed: args.seed,
    };
    let mode = if args.append {
        OpenMode::Append
    } else {
        OpenMode::Truncate
    };

    let mut writer =
        LogWriter::open(&args.path, mode).map_err(|err| write_error("open log failed", err))?;
    let frames = TelemetrySimulator::new(config)
        .run(&mut writer)
        .map_err(|err| write_error("record failed", err))?;

    let path = args.path.display().to_string();
    let out = RecordOutput {
        path: &path,
        frames,
        seed: args.seed,
        step_ms: args.step_ms,
        appended: args.append,
    };
    print_record(&out, format);
    Ok(SUCCESS)
}

fn print_record(out: &RecordOutput<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            let verb = if out.appended { "appended" } else { "recorded" };
            println!(
                "{verb} {} frames to {} (seed {}, step {} ms)",
                out.frames, out.path, out.seed, out.step_ms
            );
        }
        OutputFormat::Raw => {
            println!("{}", out.frames);
        }
    }
}
