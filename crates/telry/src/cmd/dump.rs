use telry_log::LogReader;
use telry_sim::TelemetryFrame;
use telry_wire::PacketDecoder;

use crate::cmd::{read_options, DumpArgs};
use crate::exit::{decode_error, parse_error, CliResult, SUCCESS};
use crate::output::{FramePrinter, OutputFormat, Units};

pub fn run(args: DumpArgs, format: OutputFormat) -> CliResult<i32> {
    let options = read_options(args.max_packet_size)?;
    let mut reader = LogReader::with_options(&args.path, options)
        .map_err(|err| parse_error("open log failed", err))?;

    let units = if args.imperial {
        Units::Imperial
    } else {
        Units::Metric
    };
    let mut printer = FramePrinter::new(format, units);

    let mut payload = Vec::new();
    let mut index = 0u64;
    while args.limit.is_none_or(|limit| index < limit) {
        let more = reader
            .read_next(&mut payload)
            .map_err(|err| parse_error(&format!("record {index} unreadable"), err))?;
        if !more {
            break;
        }

        let frame = TelemetryFrame::decode(&mut PacketDecoder::new(&payload))
            .map_err(|err| decode_error(&format!("record {index} is not a telemetry frame"), err))?;
        printer.frame(index, &frame, &payload);
        index += 1;
    }

    printer.finish();
    Ok(SUCCESS)
}
