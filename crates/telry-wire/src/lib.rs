//! Typed byte packet codec for the telry log format.
//!
//! Record payloads are built field by field with [`PacketEncoder`] and read
//! back with [`PacketDecoder`]:
//! - Multi-byte integers and floats follow the [`ByteOrder`] chosen at
//!   construction (little-endian unless asked otherwise).
//! - Strings carry a u16 length prefix that is always little-endian,
//!   independent of the configured order.
//! - [`crc::checksum`] is the CRC32 the log framing stores alongside every
//!   payload.
//!
//! The codec knows nothing about files or framing; that lives in `telry-log`.

pub mod crc;
pub mod decode;
pub mod encode;
pub mod error;
pub mod order;

pub use crc::checksum;
pub use decode::PacketDecoder;
pub use encode::{PacketEncoder, MAX_STRING_LEN};
pub use error::{DecodeError, EncodeError};
pub use order::ByteOrder;
