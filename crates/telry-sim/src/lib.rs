//! Deterministic telemetry source for exercising the TLRY log tooling.
//!
//! [`TelemetrySimulator`] evolves a small physical model (a rover drifting
//! at constant velocity with a slowly oscillating temperature and a
//! decaying battery) and emits [`TelemetryFrame`]s with seeded Gaussian
//! sensor noise. The same [`SimConfig`] always yields byte-identical
//! output, which makes generated logs usable as fixtures.

pub mod frame;
pub mod sim;

pub use frame::{TelemetryFrame, STATUS_LOW_VOLTAGE, STATUS_OVER_TEMP};
pub use sim::{status_flags, SimConfig, TelemetrySimulator};
