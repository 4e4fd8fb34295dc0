//! Telemetry frame wire format.
//!
//! One frame is 32 bytes, all fields little-endian:
//!
//! ```text
//! timestamp_ms:u64  temperature_c:f32  voltage_v:f32  position_x:f32
//! position_y:f32    velocity_mps:f32   status_flags:u32
//! ```

use serde::{Deserialize, Serialize};
use telry_wire::{DecodeError, PacketDecoder, PacketEncoder};

/// Battery voltage has dropped below the low-voltage threshold.
pub const STATUS_LOW_VOLTAGE: u32 = 1 << 0;

/// Temperature has risen above the over-temperature threshold.
pub const STATUS_OVER_TEMP: u32 = 1 << 1;

/// One sampled telemetry snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub timestamp_ms: u64,
    pub temperature_c: f32,
    pub voltage_v: f32,
    pub position_x: f32,
    pub position_y: f32,
    pub velocity_mps: f32,
    pub status_flags: u32,
}

impl TelemetryFrame {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 32;

    /// Append this frame to `enc` in wire order.
    pub fn encode(&self, enc: &mut PacketEncoder) {
        enc.put_u64(self.timestamp_ms)
            .put_f32(self.temperature_c)
            .put_f32(self.voltage_v)
            .put_f32(self.position_x)
            .put_f32(self.position_y)
            .put_f32(self.velocity_mps)
            .put_u32(self.status_flags);
    }

    /// Decode one frame from the decoder's current position.
    pub fn decode(dec: &mut PacketDecoder<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            timestamp_ms: dec.read_u64()?,
            temperature_c: dec.read_f32()?,
            voltage_v: dec.read_f32()?,
            position_x: dec.read_f32()?,
            position_y: dec.read_f32()?,
            velocity_mps: dec.read_f32()?,
            status_flags: dec.read_u32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TelemetryFrame {
        TelemetryFrame {
            timestamp_ms: 1_700_000_000_123,
            temperature_c: 21.5,
            voltage_v: 11.8,
            position_x: 3.25,
            position_y: -1.5,
            velocity_mps: 0.1,
            status_flags: STATUS_OVER_TEMP,
        }
    }

    #[test]
    fn encoded_frame_is_32_bytes() {
        let mut enc = PacketEncoder::new();
        sample().encode(&mut enc);
        assert_eq!(enc.len(), TelemetryFrame::ENCODED_LEN);
    }

    #[test]
    fn layout_is_little_endian_in_wire_order() {
        let frame = sample();
        let mut enc = PacketEncoder::new();
        frame.encode(&mut enc);

        let bytes = enc.as_bytes();
        assert_eq!(&bytes[0..8], &frame.timestamp_ms.to_le_bytes());
        assert_eq!(&bytes[8..12], &frame.temperature_c.to_le_bytes());
        assert_eq!(&bytes[12..16], &frame.voltage_v.to_le_bytes());
        assert_eq!(&bytes[16..20], &frame.position_x.to_le_bytes());
        assert_eq!(&bytes[20..24], &frame.position_y.to_le_bytes());
        assert_eq!(&bytes[24..28], &frame.velocity_mps.to_le_bytes());
        assert_eq!(&bytes[28..32], &frame.status_flags.to_le_bytes());
    }

    #[test]
    fn round_trips_exactly() {
        let frame = sample();
        let mut enc = PacketEncoder::new();
        frame.encode(&mut enc);

        let mut dec = PacketDecoder::new(enc.as_bytes());
        let decoded = TelemetryFrame::decode(&mut dec).unwrap();
        assert_eq!(decoded, frame);
        assert!(dec.is_empty());
    }

    #[test]
    fn short_buffer_fails_to_decode() {
        let mut enc = PacketEncoder::new();
        sample().encode(&mut enc);

        let mut dec = PacketDecoder::new(&enc.as_bytes()[..TelemetryFrame::ENCODED_LEN - 1]);
        assert!(TelemetryFrame::decode(&mut dec).is_err());
    }

    #[test]
    fn status_bits_do_not_overlap() {
        assert_eq!(STATUS_LOW_VOLTAGE & STATUS_OVER_TEMP, 0);
        assert_eq!(STATUS_LOW_VOLTAGE, 1);
        assert_eq!(STATUS_OVER_TEMP, 2);
    }
}
