//! BK-0010 .BIN snapshot reader
//!
//! A .BIN file is a 4-byte little-endian header (load address, length)
//! followed by the raw memory image. Emulators do not always keep the
//! length field in sync with the file, so the reader can take the payload
//! size either from the header or from the physical size of the source.

use crate::error::{Result, TapeError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Size of the BIN header in bytes
pub const BIN_HEADER_LEN: u64 = 4;

/// Where the payload length is taken from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LengthMode {
    /// Trust the length field of the BIN header
    #[default]
    Declared,
    /// Read everything after the header
    Physical,
}

impl LengthMode {
    /// Pick the mode from the "use file size" flag
    pub fn from_file_size_flag(use_file_size: bool) -> Self {
        if use_file_size {
            LengthMode::Physical
        } else {
            LengthMode::Declared
        }
    }
}

/// Parsed BIN snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinImage {
    /// Load address from the header
    pub start_address: u16,
    /// Length field from the header, may differ from `payload.len()`
    pub declared_length: u16,
    /// Memory image
    pub payload: Vec<u8>,
    /// Bytes present after the header in the source
    pub physical_length: u64,
}

impl BinImage {
    /// Read a snapshot from a source holding `total_len` bytes.
    ///
    /// The source does not need to support seeking; `total_len` replaces
    /// the file size in [`LengthMode::Physical`].
    pub fn read_from<R: Read>(mut reader: R, total_len: u64, mode: LengthMode) -> Result<Self> {
        let mut header = [0u8; BIN_HEADER_LEN as usize];
        let got = read_up_to(&mut reader, &mut header)?;
        if got < header.len() {
            return Err(TapeError::TruncatedHeader {
                available: got as u64,
            });
        }

        let start_address = u16::from_le_bytes([header[0], header[1]]);
        let declared_length = u16::from_le_bytes([header[2], header[3]]);
        let physical_length = total_len.saturating_sub(BIN_HEADER_LEN);

        let to_read: i64 = match mode {
            LengthMode::Declared => declared_length as i64,
            LengthMode::Physical => total_len as i64 - BIN_HEADER_LEN as i64,
        };
        if to_read <= 0 {
            return Err(TapeError::InvalidLength { length: to_read });
        }
        if to_read > u16::MAX as i64 {
            return Err(TapeError::PayloadTooLarge {
                length: to_read as u64,
            });
        }

        let mut payload = vec![0u8; to_read as usize];
        let got = read_up_to(&mut reader, &mut payload)?;
        if got < payload.len() {
            return Err(TapeError::TruncatedPayload {
                expected: payload.len(),
                available: got,
            });
        }

        if mode == LengthMode::Declared && declared_length as u64 != physical_length {
            tracing::debug!(
                declared = declared_length,
                physical = physical_length,
                "BIN header length differs from the file size"
            );
        }

        Ok(Self {
            start_address,
            declared_length,
            payload,
            physical_length,
        })
    }

    /// Parse a snapshot held in memory
    pub fn from_bytes(data: &[u8], mode: LengthMode) -> Result<Self> {
        Self::read_from(data, data.len() as u64, mode)
    }

    /// Load a snapshot from disk
    pub fn load<P: AsRef<Path>>(path: P, mode: LengthMode) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let total_len = file.metadata()?.len();
        Self::read_from(BufReader::new(file), total_len, mode)
    }

    /// Length written into the tape header: the number of payload bytes
    /// that are actually encoded.
    pub fn tape_length(&self) -> Result<u16> {
        u16::try_from(self.payload.len()).map_err(|_| TapeError::PayloadTooLarge {
            length: self.payload.len() as u64,
        })
    }

    /// Whether the header length matches the bytes following it
    pub fn length_matches(&self) -> bool {
        self.declared_length as u64 == self.physical_length
    }
}

/// Fill `buf` as far as the reader allows, returning the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
