//! CRC32 checksum over record payloads.
//!
//! The variant is CRC-32/ISO-HDLC as implemented by `crc32fast`: reflected,
//! polynomial 0x04C11DB7, init and final XOR 0xFFFFFFFF. Writer and reader
//! must agree on this exactly; it is part of the on-disk contract, pinned by
//! the standard "123456789" check vector in the tests below.

/// Compute the CRC32 of `data`.
///
/// Pure and deterministic. The empty slice is valid input and yields 0.
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
