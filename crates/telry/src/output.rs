use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use telry_sim::{TelemetryFrame, STATUS_LOW_VOLTAGE, STATUS_OVER_TEMP};

use crate::units;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Units for human-readable frame fields. JSON output always stays metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

#[derive(Serialize)]
struct FrameOutput {
    index: u64,
    timestamp_ms: u64,
    temperature_c: f32,
    voltage_v: f32,
    position_x_m: f32,
    position_y_m: f32,
    velocity_mps: f32,
    status_flags: u32,
    status: Vec<&'static str>,
}

/// Streams frames in the selected format. Table output is buffered so the
/// whole dump renders as one table; call [`finish`](Self::finish) last.
pub struct FramePrinter {
    format: OutputFormat,
    units: Units,
    table: Option<Table>,
}

impl FramePrinter {
    pub fn new(format: OutputFormat, units: Units) -> Self {
        let table = matches!(format, OutputFormat::Table).then(|| {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(match units {
                    Units::Metric => vec![
                        "#", "TIME (ms)", "TEMP (°C)", "VOLT (V)", "X (m)", "Y (m)",
                        "VEL (m/s)", "STATUS",
                    ],
                    Units::Imperial => vec![
                        "#", "TIME (ms)", "TEMP (°F)", "VOLT (V)", "X (ft)", "Y (ft)",
                        "VEL (ft/s)", "STATUS",
                    ],
                });
            table
        });
        Self {
            format,
            units,
            table,
        }
    }

    pub fn frame(&mut self, index: u64, frame: &TelemetryFrame, payload: &[u8]) {
        match self.format {
            OutputFormat::Json => {
                let out = FrameOutput {
                    index,
                    timestamp_ms: frame.timestamp_ms,
                    temperature_c: frame.temperature_c,
                    voltage_v: frame.voltage_v,
                    position_x_m: frame.position_x,
                    position_y_m: frame.position_y,
                    velocity_mps: frame.velocity_mps,
                    status_flags: frame.status_flags,
                    status: status_names(frame.status_flags),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Table => {
                let temperature = self.temperature(frame.temperature_c);
                let position_x = self.distance(frame.position_x);
                let position_y = self.distance(frame.position_y);
                let velocity = self.distance(frame.velocity_mps);
                if let Some(table) = self.table.as_mut() {
                    table.add_row(vec![
                        index.to_string(),
                        frame.timestamp_ms.to_string(),
                        format!("{temperature:.2}"),
                        format!("{:.2}", frame.voltage_v),
                        format!("{position_x:.3}"),
                        format!("{position_y:.3}"),
                        format!("{velocity:.3}"),
                        status_label(frame.status_flags),
                    ]);
                }
            }
            OutputFormat::Pretty => {
                let (temp_unit, dist_unit, vel_unit) = match self.units {
                    Units::Metric => ("°C", "m", "m/s"),
                    Units::Imperial => ("°F", "ft", "ft/s"),
                };
                println!(
                    "#{index} t={}ms temp={:.2}{temp_unit} volt={:.2}V pos=({:.3}, {:.3}){dist_unit} vel={:.3}{vel_unit} status={}",
                    frame.timestamp_ms,
                    self.temperature(frame.temperature_c),
                    frame.voltage_v,
                    self.distance(frame.position_x),
                    self.distance(frame.position_y),
                    self.distance(frame.velocity_mps),
                    status_label(frame.status_flags),
                );
            }
            OutputFormat::Raw => {
                print_raw(payload);
            }
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
    }

    fn temperature(&self, celsius: f32) -> f32 {
        match self.units {
            Units::Metric => celsius,
            Units::Imperial => units::celsius_to_fahrenheit(celsius),
        }
    }

    fn distance(&self, meters: f32) -> f32 {
        match self.units {
            Units::Metric => meters,
            Units::Imperial => units::meters_to_feet(meters),
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn status_names(flags: u32) -> Vec<&'static str> {
    let mut names = Vec::new();
    if flags & STATUS_LOW_VOLTAGE != 0 {
        names.push("LOW_VOLTAGE");
    }
    if flags & STATUS_OVER_TEMP != 0 {
        names.push("OVER_TEMP");
    }
    names
}

pub fn status_label(flags: u32) -> String {
    let names = status_names(flags);
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join("|")
    }
}
