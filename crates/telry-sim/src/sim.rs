//! Seeded telemetry signal model.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use telry_log::{LogWriter, WriteError};
use telry_wire::PacketEncoder;
use tracing::info;

use crate::frame::{TelemetryFrame, STATUS_LOW_VOLTAGE, STATUS_OVER_TEMP};

const BASE_TEMPERATURE_C: f32 = 20.0;
const TEMPERATURE_WAVE_AMPLITUDE_C: f32 = 0.1;
const TEMPERATURE_WAVE_PERIOD_S: f32 = 10.0;
const INITIAL_VOLTAGE_V: f32 = 12.0;
const VOLTAGE_DECAY_PER_S: f32 = 0.04;
const INITIAL_VELOCITY_MPS: f32 = 0.1;

const LOW_VOLTAGE_THRESHOLD_V: f32 = 9.0;
const OVER_TEMP_THRESHOLD_C: f32 = 75.0;

const NOISE_SIGMA_TEMPERATURE_C: f32 = 0.5;
const NOISE_SIGMA_VOLTAGE_V: f32 = 0.02;
const NOISE_SIGMA_POSITION_M: f32 = 0.1;
const NOISE_SIGMA_VELOCITY_MPS: f32 = 0.05;

/// Simulation parameters. The same config always produces the same frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Timestamp of the first frame, in milliseconds.
    pub start_time_ms: u64,
    /// Milliseconds of simulated time between frames.
    pub step_ms: u64,
    /// How many frames [`TelemetrySimulator::run`] writes.
    pub packet_count: u64,
    /// Noise generator seed.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time_ms: 0,
            step_ms: 100,
            packet_count: 1000,
            seed: 42,
        }
    }
}

/// Derive status bits from sampled sensor values.
pub fn status_flags(temperature_c: f32, voltage_v: f32) -> u32 {
    let mut flags = 0;
    if voltage_v < LOW_VOLTAGE_THRESHOLD_V {
        flags |= STATUS_LOW_VOLTAGE;
    }
    if temperature_c > OVER_TEMP_THRESHOLD_C {
        flags |= STATUS_OVER_TEMP;
    }
    flags
}

/// Evolves the signal model and stamps out noisy frames.
///
/// The model is a rover drifting at a constant velocity along both axes,
/// a temperature tracking a slow sine wave around 20 °C, and a battery
/// decaying linearly from 12 V toward a floor of zero. Each emitted frame
/// adds seeded Gaussian noise on top of the underlying state, so repeated
/// runs with one seed agree bit for bit while distinct seeds diverge.
pub struct TelemetrySimulator {
    config: SimConfig,
    rng: StdRng,
    time_ms: u64,
    position_x: f32,
    position_y: f32,
    velocity_mps: f32,
    temperature_c: f32,
    voltage_v: f32,
    wave_angle: f32,
}

impl TelemetrySimulator {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
            time_ms: config.start_time_ms,
            position_x: 0.0,
            position_y: 0.0,
            velocity_mps: INITIAL_VELOCITY_MPS,
            temperature_c: BASE_TEMPERATURE_C,
            voltage_v: INITIAL_VOLTAGE_V,
            wave_angle: 0.0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Sample one frame at the current simulated time, then step the model.
    ///
    /// Noise applies to the emitted frame only, never to the underlying
    /// state, so drift does not accumulate from sampling.
    pub fn next_frame(&mut self) -> TelemetryFrame {
        let temperature_c = self.temperature_c + self.noise(NOISE_SIGMA_TEMPERATURE_C);
        let voltage_v = self.voltage_v + self.noise(NOISE_SIGMA_VOLTAGE_V);
        let position_x = self.position_x + self.noise(NOISE_SIGMA_POSITION_M);
        let position_y = self.position_y + self.noise(NOISE_SIGMA_POSITION_M);
        let velocity_mps = self.velocity_mps + self.noise(NOISE_SIGMA_VELOCITY_MPS);

        let frame = TelemetryFrame {
            timestamp_ms: self.time_ms,
            temperature_c,
            voltage_v,
            position_x,
            position_y,
            velocity_mps,
            status_flags: status_flags(temperature_c, voltage_v),
        };
        self.advance();
        frame
    }

    /// Write `packet_count` encoded frames to `writer` and flush.
    pub fn run(&mut self, writer: &mut LogWriter) -> Result<u64, WriteError> {
        let mut encoder = PacketEncoder::new();
        let mut written = 0u64;
        for _ in 0..self.config.packet_count {
            let frame = self.next_frame();
            encoder.clear();
            frame.encode(&mut encoder);
            writer.write_packet(encoder.as_bytes())?;
            written += 1;
        }
        writer.flush()?;
        info!(frames = written, "simulation run complete");
        Ok(written)
    }

    fn advance(&mut self) {
        let dt_s = self.config.step_ms as f32 / 1000.0;

        self.position_x += self.velocity_mps * dt_s;
        self.position_y += self.velocity_mps * dt_s;

        self.wave_angle += (TAU / TEMPERATURE_WAVE_PERIOD_S) * dt_s;
        if self.wave_angle > TAU {
            self.wave_angle -= TAU;
        }
        self.temperature_c =
            BASE_TEMPERATURE_C + TEMPERATURE_WAVE_AMPLITUDE_C * self.wave_angle.sin();

        self.voltage_v = (self.voltage_v - VOLTAGE_DECAY_PER_S * dt_s).max(0.0);

        self.time_ms += self.config.step_ms;
    }

    /// Gaussian sample via the Box-Muller transform. The uniform draw is
    /// kept away from zero so the log stays finite.
    fn noise(&mut self, sigma: f32) -> f32 {
        let u1 = self.rng.gen_range(f32::EPSILON..1.0);
        let u2: f32 = self.rng.gen();
        sigma * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}
