//! On-disk layout constants for the telry log format.
//!
//! ```text
//! ┌───────────────────────────────┬──────────────────────────────────────┐
//! │ Header (8 bytes)              │ Records (repeated)                   │
//! │ MAGIC(4) VERSION:u16 FLAGS:u16│ SIZE:u32 PAYLOAD(SIZE-4) CRC:u32     │
//! └───────────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! All framing fields are little-endian. `SIZE` counts the payload plus the
//! trailing CRC, so a valid record never declares a size below 4.

/// File magic: ASCII `TLRY`.
pub const MAGIC: [u8; 4] = *b"TLRY";

/// The single supported format version.
pub const FORMAT_VERSION: u16 = 1;

/// Header length: magic (4) + version (2) + flags (2).
pub const HEADER_LEN: usize = 8;

/// Record size field length.
pub const SIZE_FIELD_LEN: usize = 4;

/// Trailing CRC length.
pub const CRC_LEN: usize = 4;

/// Smallest valid record size value: a record holding only its CRC.
pub const MIN_RECORD_SIZE: u32 = CRC_LEN as u32;

/// Default defensive cap on a record's size field: 64 KiB.
pub const DEFAULT_MAX_PACKET_SIZE: usize = 64 * 1024;

/// Parsed file header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version; readable only when equal to [`FORMAT_VERSION`].
    pub version: u16,
    /// Reserved. Written as zero, preserved on read.
    pub flags: u16,
}

impl FileHeader {
    /// Header for a freshly created file.
    pub fn current() -> Self {
        Self {
            version: FORMAT_VERSION,
            flags: 0,
        }
    }

    /// Serialize to the 8-byte on-disk form.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..6].copy_from_slice(&self.version.to_le_bytes());
        buf[6..8].copy_from_slice(&self.flags.to_le_bytes());
        buf
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::current()
    }
}
