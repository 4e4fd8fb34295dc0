use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use telry_log::LogReader;

use crate::cmd::InfoArgs;
use crate::exit::{io_error, parse_error, CliResult, SUCCESS};
use crate::output::OutputFormat;
use crate::units;

#[derive(Serialize)]
struct InfoOutput<'a> {
    path: &'a str,
    file_size_bytes: u64,
    version: u16,
    flags: u16,
    records: u64,
    payload_bytes: u64,
    min_payload_bytes: Option<u64>,
    max_payload_bytes: Option<u64>,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let file_size_bytes = std::fs::metadata(&args.path)
        .map_err(|err| io_error("stat log failed", err))?
        .len();
    let mut reader =
        LogReader::open(&args.path).map_err(|err| parse_error("open log failed", err))?;
    let version = reader.version();
    let flags = reader.flags();

    let mut payload = Vec::new();
    let mut records = 0u64;
    let mut payload_bytes = 0u64;
    let mut min_payload_bytes: Option<u64> = None;
    let mut max_payload_bytes: Option<u64> = None;
    loop {
        let more = reader
            .read_next(&mut payload)
            .map_err(|err| parse_error(&format!("record {records} invalid"), err))?;
        if !more {
            break;
        }

        let len = payload.len() as u64;
        records += 1;
        payload_bytes += len;
        min_payload_bytes = Some(min_payload_bytes.map_or(len, |min| min.min(len)));
        max_payload_bytes = Some(max_payload_bytes.map_or(len, |max| max.max(len)));
    }

    let path = args.path.display().to_string();
    let out = InfoOutput {
        path: &path,
        file_size_bytes,
        version,
        flags,
        records,
        payload_bytes,
        min_payload_bytes,
        max_payload_bytes,
    };
    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec!["path".to_string(), out.path.to_string()])
                .add_row(vec![
                    "file size".to_string(),
                    format!(
                        "{} bytes ({:.1} KiB)",
                        out.file_size_bytes,
                        units::bytes_to_kib(out.file_size_bytes)
                    ),
                ])
                .add_row(vec!["format version".to_string(), out.version.to_string()])
                .add_row(vec!["flags".to_string(), format!("{:#06x}", out.flags)])
                .add_row(vec!["records".to_string(), out.records.to_string()])
                .add_row(vec![
                    "payload bytes".to_string(),
                    out.payload_bytes.to_string(),
                ])
                .add_row(vec![
                    "payload size range".to_string(),
                    payload_range(out.min_payload_bytes, out.max_payload_bytes),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("Log Info:");
            println!("  Path:           {}", out.path);
            println!(
                "  File size:      {} bytes ({:.1} KiB)",
                out.file_size_bytes,
                units::bytes_to_kib(out.file_size_bytes)
            );
            println!("  Format version: {}", out.version);
            println!("  Flags:          {:#06x}", out.flags);
            println!("  Records:        {}", out.records);
            println!("  Payload bytes:  {}", out.payload_bytes);
            println!(
                "  Payload range:  {}",
                payload_range(out.min_payload_bytes, out.max_payload_bytes)
            );
        }
        OutputFormat::Raw => {
            println!("{}", out.records);
        }
    }
}

fn payload_range(min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min == max => format!("{min} bytes"),
        (Some(min), Some(max)) => format!("{min}..{max} bytes"),
        _ => "n/a".to_string(),
    }
}
