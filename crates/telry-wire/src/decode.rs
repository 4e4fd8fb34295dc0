use crate::error::DecodeError;
use crate::order::ByteOrder;

/// Reads typed values back from a borrowed packet payload.
///
/// The decoder never copies or owns the underlying bytes: it holds a slice
/// and shrinks it from the front as values are consumed. A read that asks
/// for more than remains fails with [`DecodeError::OutOfRange`] and leaves
/// the cursor where it was.
#[derive(Debug)]
pub struct PacketDecoder<'a> {
    buf: &'a [u8],
    order: ByteOrder,
}

impl<'a> PacketDecoder<'a> {
    /// Wrap a payload for little-endian reading.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_order(buf, ByteOrder::Little)
    }

    /// Wrap a payload with an explicit byte order.
    pub fn with_order(buf: &'a [u8], order: ByteOrder) -> Self {
        Self { buf, order }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The configured byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.buf.len() {
            return Err(DecodeError::OutOfRange {
                requested: len,
                remaining: self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume one byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Consume two bytes in the configured order.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.take_array()?;
        Ok(match self.order {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        })
    }

    /// Consume four bytes in the configured order.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take_array()?;
        Ok(match self.order {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }

    /// Consume eight bytes in the configured order.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.take_array()?;
        Ok(match self.order {
            ByteOrder::Little => u64::from_le_bytes(bytes),
            ByteOrder::Big => u64::from_be_bytes(bytes),
        })
    }

    /// Consume four bytes and reinterpret them as an IEEE-754 float.
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Copy exactly `dst.len()` bytes into `dst`.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), DecodeError> {
        let src = self.take(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Read a string written by [`PacketEncoder::put_str`]: an always
    /// little-endian u16 length prefix followed by UTF-8 bytes.
    ///
    /// All-or-nothing: the cursor advances only when prefix, body, and UTF-8
    /// validation all succeed.
    ///
    /// [`PacketEncoder::put_str`]: crate::PacketEncoder::put_str
    pub fn read_str(&mut self) -> Result<String, DecodeError> {
        if self.buf.len() < 2 {
            return Err(DecodeError::OutOfRange {
                requested: 2,
                remaining: self.buf.len(),
            });
        }
        let len = u16::from_le_bytes([self.buf[0], self.buf[1]]) as usize;
        if self.buf.len() < 2 + len {
            return Err(DecodeError::OutOfRange {
                requested: 2 + len,
                remaining: self.buf.len(),
            });
        }
        let text = std::str::from_utf8(&self.buf[2..2 + len])?.to_owned();
        self.buf = &self.buf[2 + len..];
        Ok(text)
    }

    /// Advance the cursor `n` bytes without returning them. Forward only.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.take(n).map(|_| ())
    }

    /// Empty the view; every subsequent read fails. Used to explicitly
    /// invalidate a decoder once its packet is done with.
    pub fn clear(&mut self) {
        self.buf = &[];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::PacketEncoder;

    #[test]
    fn reads_little_endian_values() {
        let bytes = [0xAA, 0x22, 0x11, 0x66, 0x55, 0x44, 0x33];
        let mut dec = PacketDecoder::new(&bytes);
        assert_eq!(dec.read_u8().unwrap(), 0xAA);
        assert_eq!(dec.read_u16().unwrap(), 0x1122);
        assert_eq!(dec.read_u32().unwrap(), 0x3344_5566);
        assert!(dec.is_empty());
    }

    #[test]
    fn reads_big_endian_values() {
        let bytes = [0x11, 0x22, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut dec = PacketDecoder::with_order(&bytes, ByteOrder::Big);
        assert_eq!(dec.read_u16().unwrap(), 0x1122);
        assert_eq!(dec.read_u64().unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn f32_round_trips_through_bits() {
        let mut enc = PacketEncoder::new();
        enc.put_f32(-3.5).put_f32(f32::INFINITY);
        let mut dec = PacketDecoder::new(enc.as_bytes());
        assert_eq!(dec.read_f32().unwrap(), -3.5);
        assert_eq!(dec.read_f32().unwrap(), f32::INFINITY);
    }

    #[test]
    fn mixed_sequence_round_trips_both_orders() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let mut enc = PacketEncoder::with_order(order);
            enc.put_u8(7)
                .put_u16(0x0102)
                .put_u32(0xDEAD_BEEF)
                .put_u64(u64::MAX - 1)
                .put_f32(2.25)
                .put_bytes(&[9, 8, 7]);
            enc.put_str("moteur").unwrap();

            let mut dec = PacketDecoder::with_order(enc.as_bytes(), order);
            assert_eq!(dec.read_u8().unwrap(), 7);
            assert_eq!(dec.read_u16().unwrap(), 0x0102);
            assert_eq!(dec.read_u32().unwrap(), 0xDEAD_BEEF);
            assert_eq!(dec.read_u64().unwrap(), u64::MAX - 1);
            assert_eq!(dec.read_f32().unwrap(), 2.25);
            let mut raw = [0u8; 3];
            dec.read_bytes(&mut raw).unwrap();
            assert_eq!(raw, [9, 8, 7]);
            assert_eq!(dec.read_str().unwrap(), "moteur");
            assert!(dec.is_empty());
        }
    }

    #[test]
    fn out_of_range_reports_counts() {
        let bytes = [1, 2];
        let mut dec = PacketDecoder::new(&bytes);
        let err = dec.read_u32().unwrap_err();
        assert!(
            matches!(err, DecodeError::OutOfRange { requested: 4, remaining: 2 }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn failed_read_leaves_cursor_unchanged() {
        let bytes = [1, 2, 3];
        let mut dec = PacketDecoder::new(&bytes);
        assert!(dec.read_u64().is_err());
        assert_eq!(dec.remaining(), 3);
        assert_eq!(dec.read_u8().unwrap(), 1);
    }

    #[test]
    fn read_bytes_with_empty_dst_always_succeeds() {
        let mut dec = PacketDecoder::new(&[]);
        let mut dst = [0u8; 0];
        dec.read_bytes(&mut dst).unwrap();
    }

    #[test]
    fn skip_advances_forward_only() {
        let bytes = [1, 2, 3, 4, 5];
        let mut dec = PacketDecoder::new(&bytes);
        dec.skip(2).unwrap();
        assert_eq!(dec.read_u8().unwrap(), 3);
        assert_eq!(dec.remaining(), 2);
        let err = dec.skip(3).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutOfRange {
                requested: 3,
                remaining: 2
            }
        ));
        assert_eq!(dec.remaining(), 2);
    }

    #[test]
    fn skip_zero_is_a_no_op() {
        let mut dec = PacketDecoder::new(&[]);
        dec.skip(0).unwrap();
        assert!(dec.is_empty());
    }

    #[test]
    fn clear_invalidates_the_view() {
        let bytes = [1, 2, 3];
        let mut dec = PacketDecoder::new(&bytes);
        dec.clear();
        assert!(dec.is_empty());
        assert_eq!(dec.remaining(), 0);
        assert!(dec.read_u8().is_err());
    }

    #[test]
    fn string_prefix_read_ignores_configured_order() {
        let mut enc = PacketEncoder::with_order(ByteOrder::Big);
        enc.put_str("tlry").unwrap();
        let mut dec = PacketDecoder::with_order(enc.as_bytes(), ByteOrder::Big);
        assert_eq!(dec.read_str().unwrap(), "tlry");
    }

    #[test]
    fn read_str_truncated_body_leaves_cursor() {
        // Prefix claims 5 bytes, only 2 present.
        let bytes = [0x05, 0x00, b'a', b'b'];
        let mut dec = PacketDecoder::new(&bytes);
        let err = dec.read_str().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutOfRange {
                requested: 7,
                remaining: 4
            }
        ));
        assert_eq!(dec.remaining(), 4);
    }

    #[test]
    fn read_str_rejects_invalid_utf8() {
        let bytes = [0x02, 0x00, 0xFF, 0xFE];
        let mut dec = PacketDecoder::new(&bytes);
        let err = dec.read_str().unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8(_)));
        assert_eq!(dec.remaining(), 4);
    }

    #[test]
    fn decoder_is_a_view_not_a_copy() {
        let backing = vec![1u8, 2, 3, 4];
        let mut dec = PacketDecoder::new(&backing);
        dec.skip(1).unwrap();
        // Still reading the caller's bytes, just further along.
        assert_eq!(dec.read_u8().unwrap(), backing[1]);
    }
}
