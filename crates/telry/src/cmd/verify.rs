use serde::Serialize;
use telry_log::LogReader;

use crate::cmd::{read_options, VerifyArgs};
use crate::exit::{parse_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct VerifyOutput<'a> {
    path: &'a str,
    records: u64,
    payload_bytes: u64,
    valid: bool,
}

pub fn run(args: VerifyArgs, format: OutputFormat) -> CliResult<i32> {
    let options = read_options(args.max_packet_size)?;
    let mut reader = LogReader::with_options(&args.path, options)
        .map_err(|err| parse_error("open log failed", err))?;

    let mut payload = Vec::new();
    let mut records = 0u64;
    let mut payload_bytes = 0u64;
    loop {
        match reader.read_next(&mut payload) {
            Ok(true) => {
                records += 1;
                payload_bytes += payload.len() as u64;
            }
            Ok(false) => break,
            Err(err) => {
                return Err(parse_error(&format!("record {records} invalid"), err));
            }
        }
    }

    let path = args.path.display().to_string();
    let out = VerifyOutput {
        path: &path,
        records,
        payload_bytes,
        valid: true,
    };
    print_verify(&out, format);
    Ok(SUCCESS)
}

fn print_verify(out: &VerifyOutput<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!(
                "ok: {} records, {} payload bytes ({})",
                out.records, out.payload_bytes, out.path
            );
        }
        OutputFormat::Raw => {
            println!("{}", out.records);
        }
    }
}
