use bytes::{BufMut, Bytes, BytesMut};

use crate::error::EncodeError;
use crate::order::ByteOrder;

/// Longest string storable behind the u16 length prefix.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Builds a packet payload by appending typed values to a growable buffer.
///
/// Integer and float appends follow the [`ByteOrder`] fixed at construction
/// and cannot fail; [`put_str`](Self::put_str) is the one fallible append.
/// Value appends return `&mut Self` so fields can be chained.
#[derive(Debug, Clone)]
pub struct PacketEncoder {
    buf: BytesMut,
    order: ByteOrder,
}

impl PacketEncoder {
    /// Create an empty little-endian encoder.
    pub fn new() -> Self {
        Self::with_order(ByteOrder::Little)
    }

    /// Create an empty encoder with an explicit byte order.
    pub fn with_order(order: ByteOrder) -> Self {
        Self {
            buf: BytesMut::new(),
            order,
        }
    }

    /// Append a single byte.
    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    /// Append two bytes in the configured order.
    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        match self.order {
            ByteOrder::Little => self.buf.put_u16_le(value),
            ByteOrder::Big => self.buf.put_u16(value),
        }
        self
    }

    /// Append four bytes in the configured order.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        match self.order {
            ByteOrder::Little => self.buf.put_u32_le(value),
            ByteOrder::Big => self.buf.put_u32(value),
        }
        self
    }

    /// Append eight bytes in the configured order.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        match self.order {
            ByteOrder::Little => self.buf.put_u64_le(value),
            ByteOrder::Big => self.buf.put_u64(value),
        }
        self
    }

    /// Append a float as its IEEE-754 bit pattern, four bytes in the
    /// configured order.
    pub fn put_f32(&mut self, value: f32) -> &mut Self {
        self.put_u32(value.to_bits())
    }

    /// Append raw bytes unmodified.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    /// Append a u16 length prefix followed by the string's UTF-8 bytes.
    ///
    /// The prefix is little-endian regardless of the configured order; only
    /// integer and float values follow [`ByteOrder`]. Fails without touching
    /// the buffer if the string exceeds [`MAX_STRING_LEN`] bytes.
    pub fn put_str(&mut self, text: &str) -> Result<&mut Self, EncodeError> {
        if text.len() > MAX_STRING_LEN {
            return Err(EncodeError::StringTooLong { len: text.len() });
        }
        self.buf.put_u16_le(text.len() as u16);
        self.buf.put_slice(text.as_bytes());
        Ok(self)
    }

    /// Number of bytes appended so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop all appended bytes, keeping the configured order.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Reserve capacity for at least `additional` more bytes. Contents are
    /// unaffected.
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    /// The configured byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// View the encoded payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder, freezing the payload.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for PacketEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_integer_layout() {
        let mut enc = PacketEncoder::new();
        enc.put_u8(0xAA).put_u16(0x1122).put_u32(0x3344_5566);
        assert_eq!(enc.as_bytes(), &[0xAA, 0x22, 0x11, 0x66, 0x55, 0x44, 0x33]);
    }

    #[test]
    fn big_endian_integer_layout() {
        let mut enc = PacketEncoder::with_order(ByteOrder::Big);
        enc.put_u16(0x1122).put_u64(0x0102_0304_0506_0708);
        assert_eq!(
            enc.as_bytes(),
            &[0x11, 0x22, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn default_order_is_little() {
        assert_eq!(PacketEncoder::new().byte_order(), ByteOrder::Little);
        assert_eq!(ByteOrder::default(), ByteOrder::Little);
    }

    #[test]
    fn f32_uses_bit_pattern() {
        let mut enc = PacketEncoder::new();
        enc.put_f32(1.0);
        assert_eq!(enc.as_bytes(), &1.0f32.to_bits().to_le_bytes());
    }

    #[test]
    fn string_prefix_is_little_endian_even_when_big() {
        let mut enc = PacketEncoder::with_order(ByteOrder::Big);
        enc.put_str("ab").unwrap();
        assert_eq!(enc.as_bytes(), &[0x02, 0x00, b'a', b'b']);
    }

    #[test]
    fn empty_string_is_just_the_prefix() {
        let mut enc = PacketEncoder::new();
        enc.put_str("").unwrap();
        assert_eq!(enc.as_bytes(), &[0x00, 0x00]);
    }

    #[test]
    fn string_too_long_rejected() {
        let text = "x".repeat(MAX_STRING_LEN + 1);
        let mut enc = PacketEncoder::new();
        let err = enc.put_str(&text).unwrap_err();
        assert!(matches!(err, EncodeError::StringTooLong { len } if len == MAX_STRING_LEN + 1));
        assert!(enc.is_empty());
    }

    #[test]
    fn max_len_string_accepted() {
        let text = "y".repeat(MAX_STRING_LEN);
        let mut enc = PacketEncoder::new();
        enc.put_str(&text).unwrap();
        assert_eq!(enc.len(), 2 + MAX_STRING_LEN);
    }

    #[test]
    fn chaining_appends_in_call_order() {
        let mut enc = PacketEncoder::new();
        enc.put_u8(1).put_bytes(&[2, 3]).put_u8(4);
        assert_eq!(enc.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn clear_keeps_order() {
        let mut enc = PacketEncoder::with_order(ByteOrder::Big);
        enc.put_u32(7);
        enc.clear();
        assert!(enc.is_empty());
        assert_eq!(enc.byte_order(), ByteOrder::Big);
        enc.put_u16(0x0102);
        assert_eq!(enc.as_bytes(), &[0x01, 0x02]);
    }

    #[test]
    fn reserve_does_not_change_contents() {
        let mut enc = PacketEncoder::new();
        enc.put_u8(1);
        enc.reserve(1024);
        assert_eq!(enc.as_bytes(), &[1]);
        assert_eq!(enc.len(), 1);
    }

    #[test]
    fn into_bytes_hands_off_the_payload() {
        let mut enc = PacketEncoder::new();
        enc.put_u16(0xBEEF);
        let frozen = enc.into_bytes();
        assert_eq!(frozen.as_ref(), &[0xEF, 0xBE]);
    }
}
