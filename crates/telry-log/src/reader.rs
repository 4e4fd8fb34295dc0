use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use telry_wire::crc;

use crate::error::ParseError;
use crate::format::{
    FileHeader, CRC_LEN, DEFAULT_MAX_PACKET_SIZE, FORMAT_VERSION, HEADER_LEN, MAGIC,
    MIN_RECORD_SIZE, SIZE_FIELD_LEN,
};

/// Tunable limits for [`LogReader`].
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Upper bound on a record's declared size field. Checked before any
    /// payload allocation, so a corrupted size field cannot balloon memory.
    pub max_packet_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_packet_size: DEFAULT_MAX_PACKET_SIZE,
        }
    }
}

/// Sequential reader over a telry log file.
///
/// Opening validates the 8-byte header. [`read_next`](Self::read_next) then
/// yields one verified payload per call until clean end of file. End of file
/// is only clean when it falls exactly on a record boundary; any mid-record
/// truncation and any checksum failure is an error, and errors are terminal
/// for the file (the position is not recoverable for resuming).
#[derive(Debug)]
pub struct LogReader {
    input: BufReader<File>,
    header: FileHeader,
    options: ReadOptions,
    at_eof: bool,
}

impl LogReader {
    /// Open `path` and validate its header with default [`ReadOptions`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        Self::with_options(path, ReadOptions::default())
    }

    /// Open `path` and validate its header.
    pub fn with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let mut input = BufReader::new(File::open(path)?);

        let mut magic = [0u8; 4];
        let got = read_full(&mut input, &mut magic)?;
        if got < magic.len() {
            return Err(ParseError::TruncatedHeader {
                expected: HEADER_LEN,
                got,
            });
        }
        if magic != MAGIC {
            return Err(ParseError::InvalidMagic { found: magic });
        }

        let mut rest = [0u8; 4];
        let got = read_full(&mut input, &mut rest)?;
        if got < rest.len() {
            return Err(ParseError::TruncatedHeader {
                expected: HEADER_LEN,
                got: magic.len() + got,
            });
        }
        let version = u16::from_le_bytes([rest[0], rest[1]]);
        let flags = u16::from_le_bytes([rest[2], rest[3]]);
        if version != FORMAT_VERSION {
            return Err(ParseError::UnsupportedVersion { found: version });
        }

        debug!(path = %path.display(), version, flags, "opened telemetry log for reading");

        Ok(Self {
            input,
            header: FileHeader { version, flags },
            options,
            at_eof: false,
        })
    }

    /// Read the next record's payload into `out`.
    ///
    /// Returns `Ok(true)` with `out` holding exactly the payload bytes, or
    /// `Ok(false)` on clean end of file. Clean means zero bytes of the next
    /// size field were available; a partial size field is corruption. Once
    /// end of file is reported the reader stays there, even if the file
    /// grows afterwards.
    ///
    /// On a truncated record `out` is cleared before the error returns. On
    /// [`ParseError::CrcMismatch`] `out` keeps the unverified payload.
    pub fn read_next(&mut self, out: &mut Vec<u8>) -> Result<bool, ParseError> {
        if self.at_eof {
            return Ok(false);
        }

        let mut size_bytes = [0u8; SIZE_FIELD_LEN];
        let got = read_full(&mut self.input, &mut size_bytes)?;
        if got == 0 {
            self.at_eof = true;
            return Ok(false);
        }
        if got < size_bytes.len() {
            return Err(ParseError::TruncatedSizeField { got });
        }

        let size = u32::from_le_bytes(size_bytes);
        if size == 0 {
            return Err(ParseError::ZeroSizePacket);
        }
        if size < MIN_RECORD_SIZE {
            return Err(ParseError::SizeTooSmallForCrc { size });
        }
        if size as usize > self.options.max_packet_size {
            return Err(ParseError::OversizedPacket {
                size,
                max: self.options.max_packet_size,
            });
        }

        let body_len = size as usize;
        let payload_len = body_len - CRC_LEN;

        out.clear();
        out.resize(payload_len, 0);
        let got = read_full(&mut self.input, out)?;
        if got < payload_len {
            out.clear();
            return Err(ParseError::TruncatedPayload {
                expected: body_len,
                got,
            });
        }

        let mut crc_bytes = [0u8; CRC_LEN];
        let got = read_full(&mut self.input, &mut crc_bytes)?;
        if got < crc_bytes.len() {
            out.clear();
            return Err(ParseError::TruncatedPayload {
                expected: body_len,
                got: payload_len + got,
            });
        }

        let stored = u32::from_le_bytes(crc_bytes);
        let computed = crc::checksum(out);
        if stored != computed {
            warn!(stored, computed, "record failed crc verification");
            return Err(ParseError::CrcMismatch { stored, computed });
        }

        Ok(true)
    }

    /// Format version from the file header.
    pub fn version(&self) -> u16 {
        self.header.version
    }

    /// Flags from the file header, preserved as written.
    pub fn flags(&self) -> u16 {
        self.header.flags
    }

    /// The size-field cap this reader enforces.
    pub fn max_packet_size(&self) -> usize {
        self.options.max_packet_size
    }
}

/// Owned iteration over payloads. Any `Err` item is terminal; callers
/// should stop consuming the iterator after the first error.
impl Iterator for LogReader {
    type Item = Result<Vec<u8>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut payload = Vec::new();
        match self.read_next(&mut payload) {
            Ok(true) => Some(Ok(payload)),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Read until `buf` is full or end of file, retrying on interruption.
///
/// Returns how many bytes were read, which the callers need to tell clean
/// end of file (zero) from mid-field truncation (some but not all).
fn read_full(input: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
