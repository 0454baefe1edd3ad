//! Tape frame assembly
//!
//! A BK-0010 tape file is laid out as:
//!
//! ```text
//! pilot x512, synchro              lead-in
//! pilot, synchro                   header marker
//! start address, length, name[16]  header
//! pilot, synchro                   data marker
//! payload bytes
//! checksum word
//! end marker
//! pilot x32 (x64 turbo), synchro   lead-out
//! ```

use crate::charset;
use crate::checksum::checksum;
use crate::options::TapeSpeed;
use crate::signal::{encoded_byte_len, Signal, SignalEncoder};
use std::fmt;

/// Number of bytes of the name field in the tape header
pub const TAPE_NAME_LEN: usize = 16;

/// Pilot periods in the lead-in
pub const LEAD_IN_SYNCHRO_COUNT: usize = 512;

/// Name field of the tape header, already in BK-0010 encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TapeName([u8; TAPE_NAME_LEN]);

impl TapeName {
    /// Build a name from text: control characters become `.`, the result is
    /// transcoded, cut to 16 bytes and padded with spaces.
    pub fn new(name: &str) -> Self {
        Self::from_encoded(&charset::transcode(&charset::sanitize_name(name)))
    }

    /// Build a name from bytes that are already BK-0010 encoded
    pub fn from_encoded(encoded: &[u8]) -> Self {
        let mut bytes = [b' '; TAPE_NAME_LEN];
        let used = encoded.len().min(TAPE_NAME_LEN);
        bytes[..used].copy_from_slice(&encoded[..used]);
        Self(bytes)
    }

    /// The 16 header bytes
    pub fn as_bytes(&self) -> &[u8; TAPE_NAME_LEN] {
        &self.0
    }
}

impl Default for TapeName {
    fn default() -> Self {
        Self([b' '; TAPE_NAME_LEN])
    }
}

impl fmt::Debug for TapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TapeName")
            .field(&String::from_utf8_lossy(&self.0))
            .finish()
    }
}

/// Fields written into the tape header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeHeader {
    /// Load address
    pub start_address: u16,
    /// Number of payload bytes
    pub length: u16,
    /// File name
    pub name: TapeName,
}

/// Assembled sample stream with its checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeFrame {
    /// Unsigned 8-bit PCM samples
    pub samples: Vec<u8>,
    /// Checksum written after the payload
    pub checksum: u16,
}

/// Exact number of samples [`assemble`] produces.
pub fn frame_len(header: &TapeHeader, payload: &[u8], crc: u16, speed: TapeSpeed) -> usize {
    let bytes_len = |data: &[u8]| data.iter().map(|&b| encoded_byte_len(b)).sum::<usize>();
    let word_len = |value: u16| bytes_len(&value.to_le_bytes()[..]);

    let pilots = LEAD_IN_SYNCHRO_COUNT + 2 + speed.trailer_synchro_count();
    pilots * Signal::StartSynchro.sample_count()
        + 4 * Signal::Synchro.sample_count()
        + word_len(header.start_address)
        + word_len(header.length)
        + bytes_len(header.name.as_bytes())
        + bytes_len(payload)
        + word_len(crc)
        + Signal::EndMarker.sample_count()
}

/// Write the whole tape file for `payload` into one sample stream.
pub fn assemble(header: &TapeHeader, payload: &[u8], speed: TapeSpeed) -> TapeFrame {
    let crc = checksum(payload);
    let mut out = SignalEncoder::with_capacity(frame_len(header, payload, crc, speed));

    out.signal(Signal::StartSynchro, LEAD_IN_SYNCHRO_COUNT);
    out.signal(Signal::Synchro, 1);

    out.signal(Signal::StartSynchro, 1);
    out.signal(Signal::Synchro, 1);

    out.word(header.start_address);
    out.word(header.length);
    out.bytes(header.name.as_bytes());

    out.signal(Signal::StartSynchro, 1);
    out.signal(Signal::Synchro, 1);

    out.bytes(payload);
    out.word(crc);

    out.signal(Signal::EndMarker, 1);
    out.signal(Signal::StartSynchro, speed.trailer_synchro_count());
    out.signal(Signal::Synchro, 1);

    tracing::debug!(
        samples = out.len(),
        checksum = crc,
        payload = payload.len(),
        "assembled tape frame"
    );

    TapeFrame {
        samples: out.into_samples(),
        checksum: crc,
    }
}
