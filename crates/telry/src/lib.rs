//! Framed, checksummed telemetry logs.
//!
//! telry stores opaque binary payloads in append-only log files with a
//! magic-and-version header, per-record length framing, and a CRC32 over
//! every payload, so truncation and corruption are always detected on read.
//!
//! # Crate Structure
//!
//! - [`wire`]: byte-order-aware packet encoding and decoding
//! - [`log`]: the TLRY log file format (header, writer, reader)
//! - [`sim`]: deterministic telemetry frame simulator (behind the `sim` feature)

/// Re-export wire codec types.
pub mod wire {
    pub use telry_wire::*;
}

/// Re-export log format types.
pub mod log {
    pub use telry_log::*;
}

/// Re-export simulator types (requires `sim` feature).
#[cfg(feature = "sim")]
pub mod sim {
    pub use telry_sim::*;
}
