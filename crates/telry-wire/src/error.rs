/// Errors from [`PacketEncoder`](crate::PacketEncoder) operations.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("string too long for u16 length prefix ({len} bytes, max 65535)")]
    StringTooLong { len: usize },
}

/// Errors from [`PacketDecoder`](crate::PacketDecoder) operations.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("requested {requested} bytes, but only {remaining} remain in the buffer")]
    OutOfRange { requested: usize, remaining: usize },
    #[error("string bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
