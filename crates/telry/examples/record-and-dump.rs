//! Record a short simulated session to a log file, then read it back.
//!
//! Run with:
//!   cargo run --example record-and-dump

use telry::log::{LogReader, LogWriter, OpenMode};
use telry::sim::{SimConfig, TelemetryFrame, TelemetrySimulator};
use telry::wire::PacketDecoder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join(format!("telry-demo-{}.bin", std::process::id()));

    let config = SimConfig {
        packet_count: 20,
        ..SimConfig::default()
    };
    let mut writer = LogWriter::open(&path, OpenMode::Truncate)?;
    let frames = TelemetrySimulator::new(config).run(&mut writer)?;
    drop(writer);
    eprintln!("recorded {frames} frames to {}", path.display());

    let mut reader = LogReader::open(&path)?;
    let mut payload = Vec::new();
    while reader.read_next(&mut payload)? {
        let frame = TelemetryFrame::decode(&mut PacketDecoder::new(&payload))?;
        println!(
            "t={:>6} ms  temp={:6.2} °C  volt={:5.2} V  pos=({:7.3}, {:7.3}) m  vel={:6.3} m/s  flags={:#04x}",
            frame.timestamp_ms,
            frame.temperature_c,
            frame.voltage_v,
            frame.position_x,
            frame.position_y,
            frame.velocity_mps,
            frame.status_flags
        );
    }

    let _ = std::fs::remove_file(&path);
    Ok(())
}
