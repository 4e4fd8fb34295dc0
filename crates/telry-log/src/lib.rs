//! Framed, checksummed record persistence for telemetry payloads.
//!
//! A log file is an 8-byte header (magic `TLRY`, format version, reserved
//! flags) followed by records framed as:
//! - A 4-byte little-endian size (payload length plus the trailing CRC)
//! - The payload bytes, opaque to this crate
//! - A 4-byte little-endian CRC32 of the payload
//!
//! [`LogWriter`] appends records; [`LogReader`] validates the header and
//! yields payloads back, telling clean end of file apart from truncation
//! and corruption. Strictly sequential: no indexing, no seeking, one writer
//! or reader per handle.

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::{ParseError, WriteError};
pub use format::{FileHeader, DEFAULT_MAX_PACKET_SIZE, FORMAT_VERSION, HEADER_LEN, MAGIC};
pub use reader::{LogReader, ReadOptions};
pub use writer::{LogWriter, OpenMode, MAX_PAYLOAD_LEN};
