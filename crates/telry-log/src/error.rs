use std::io;

/// Errors raised while opening a log for writing or appending records.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("log write I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("payload too large to frame ({len} bytes)")]
    PacketTooLarge { len: usize },
}

/// Errors raised while opening or reading a log file.
///
/// Every variant is terminal for the file being read; clean end of file is
/// not an error and is reported by `read_next` returning `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("log read I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("truncated header ({got} of {expected} bytes)")]
    TruncatedHeader { expected: usize, got: usize },
    #[error("invalid magic {found:?} (expected \"TLRY\")")]
    InvalidMagic { found: [u8; 4] },
    #[error("unsupported format version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("truncated record size field ({got} of 4 bytes)")]
    TruncatedSizeField { got: usize },
    #[error("record declares size 0")]
    ZeroSizePacket,
    #[error("record size {size} too small to hold a CRC")]
    SizeTooSmallForCrc { size: u32 },
    #[error("record size {size} exceeds maximum {max}")]
    OversizedPacket { size: u32, max: usize },
    #[error("truncated record body ({got} of {expected} bytes)")]
    TruncatedPayload { expected: usize, got: usize },
    #[error("crc mismatch (stored {stored:#010x}, computed {computed:#010x})")]
    CrcMismatch { stored: u32, computed: u32 },
}
