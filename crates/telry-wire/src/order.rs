/// Byte order for multi-byte integer and float encodings.
///
/// Fixed at encoder/decoder construction. The log framing itself (header
/// fields, record sizes, CRCs) is always little-endian and unaffected by
/// this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least-significant byte first. The format default.
    #[default]
    Little,
    /// Most-significant byte first.
    Big,
}
