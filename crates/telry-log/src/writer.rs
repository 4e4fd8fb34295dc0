use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use bytes::{BufMut, BytesMut};
use tracing::debug;

use telry_wire::crc;

use crate::error::WriteError;
use crate::format::{FileHeader, CRC_LEN, SIZE_FIELD_LEN};

const INITIAL_FRAME_CAPACITY: usize = 8 * 1024;

/// Largest payload whose framed size still fits the u32 size field.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize - CRC_LEN;

/// How to open a log file for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create or overwrite, always writing a fresh header.
    Truncate,
    /// Keep existing records and append after them. The header is written
    /// only when the file is new or empty.
    Append,
}

/// Appends framed, checksummed records to a log file.
///
/// The writer exclusively owns its file handle. Each record is staged in an
/// internal buffer so [`write_packet`](Self::write_packet) lands as a single
/// buffered append; [`flush`](Self::flush) pushes buffered bytes to the OS.
/// Dropping the writer flushes best-effort and never panics.
#[derive(Debug)]
pub struct LogWriter {
    out: BufWriter<File>,
    frame: BytesMut,
    packets: u64,
}

impl LogWriter {
    /// Open `path` for writing in the given mode.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self, WriteError> {
        let path = path.as_ref();
        let (file, fresh) = match mode {
            OpenMode::Truncate => (File::create(path)?, true),
            OpenMode::Append => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let empty = file.metadata()?.len() == 0;
                (file, empty)
            }
        };

        let mut out = BufWriter::new(file);
        if fresh {
            out.write_all(&FileHeader::current().encode())?;
        }
        debug!(path = %path.display(), ?mode, fresh, "opened telemetry log for writing");

        Ok(Self {
            out,
            frame: BytesMut::with_capacity(INITIAL_FRAME_CAPACITY),
            packets: 0,
        })
    }

    /// Frame `payload` and append it: u32 size, payload bytes, u32 CRC of
    /// the payload, all framing fields little-endian, as one buffered write.
    ///
    /// A torn write (process killed mid-append) is not rolled back; the
    /// partial record surfaces on the next read as a truncation or CRC
    /// error.
    pub fn write_packet(&mut self, payload: &[u8]) -> Result<(), WriteError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(WriteError::PacketTooLarge { len: payload.len() });
        }
        let size = (payload.len() + CRC_LEN) as u32;
        let checksum = crc::checksum(payload);

        self.frame.clear();
        self.frame
            .reserve(SIZE_FIELD_LEN + payload.len() + CRC_LEN);
        self.frame.put_u32_le(size);
        self.frame.put_slice(payload);
        self.frame.put_u32_le(checksum);

        self.out.write_all(&self.frame)?;
        self.packets += 1;
        Ok(())
    }

    /// Push buffered bytes to the OS. No truncation, no verification.
    pub fn flush(&mut self) -> Result<(), WriteError> {
        self.out.flush()?;
        Ok(())
    }

    /// Records appended through this handle (pre-existing records in append
    /// mode are not counted).
    pub fn packet_count(&self) -> u64 {
        self.packets
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        // Closing must never raise past the destructor.
        let _ = self.out.flush();
    }
}
