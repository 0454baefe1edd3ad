//! BK-0010 BIN to WAV tape converter
//!
//! Converts BK-0010 memory snapshots (`.BIN` files) into the audio signal the
//! machine's tape interface reads, packaged as an 8-bit mono WAV file that can
//! be played into a real BK-0010 or loaded by an emulator.
//!
//! # Pipeline
//! - [`bin_file`]: parse the 4-byte BIN header and the payload
//! - [`charset`]: transcode the tape name into the BK-0010 character set
//! - [`signal`]: turn bits, bytes and markers into PCM waveforms
//! - [`tape`]: lay out lead-in, header, payload, checksum and lead-out
//! - [`amplify`]: optional gain stage stretching the signal to full range
//! - [`export`]: write the samples into a WAV container
//!
//! # Quick start
//! ```no_run
//! use bkbin2wav::{encode_bin, BinImage, EncodeOptions, LengthMode};
//!
//! let image = BinImage::load("GAME.BIN", LengthMode::Declared)?;
//! let options = EncodeOptions::default().name("GAME").amplify(true);
//! let audio = encode_bin(&image, &options)?;
//! println!("checksum {:04X}", audio.checksum);
//! audio.save("GAME.wav")?;
//! # Ok::<(), bkbin2wav::TapeError>(())
//! ```

#![warn(missing_docs)]

pub mod amplify;
pub mod bin_file;
pub mod charset;
pub mod checksum;
pub mod error;
pub mod export;
pub mod options;
pub mod signal;
pub mod tape;

pub use bin_file::{BinImage, LengthMode};
pub use checksum::checksum;
pub use error::{Result, TapeError};
pub use options::{parse_address, EncodeOptions, TapeSpeed};
pub use tape::{TapeFrame, TapeHeader, TapeName, TAPE_NAME_LEN};

use std::io::{Seek, Write};
use std::path::Path;

/// Encoded tape signal ready to be written into a WAV container
#[derive(Debug, Clone, PartialEq)]
pub struct TapeAudio {
    /// Unsigned 8-bit PCM samples
    pub samples: Vec<u8>,
    /// Playback speed, selects the sample rate
    pub speed: TapeSpeed,
    /// Checksum of the payload as written on tape
    pub checksum: u16,
    /// Gain applied by the amplifier, `None` when it did not run
    pub gain: Option<f64>,
}

impl TapeAudio {
    /// WAV sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.speed.sample_rate()
    }

    /// Write the WAV file into `sink`
    pub fn write_wav<W: Write + Seek>(&self, sink: W) -> Result<()> {
        export::write_wav(sink, &self.samples, self.speed)
    }

    /// Render the WAV file into memory
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        export::to_wav_bytes(&self.samples, self.speed)
    }

    /// Write the WAV file to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::save_wav(path, &self.samples, self.speed)
    }
}

/// Encode a BIN snapshot into a tape signal.
///
/// The tape header carries the override start address when one is set and
/// the length of the payload being encoded.
pub fn encode_bin(image: &BinImage, options: &EncodeOptions) -> Result<TapeAudio> {
    options.validate()?;

    let length = image.tape_length()?;

    let start_address = match options.start_address {
        Some(address) => {
            if address != image.start_address {
                tracing::info!(
                    bin = image.start_address,
                    tape = address,
                    "start address overridden"
                );
            }
            address
        }
        None => image.start_address,
    };

    let header = TapeHeader {
        start_address,
        length,
        name: TapeName::new(&options.name),
    };

    let TapeFrame {
        mut samples,
        checksum,
    } = tape::assemble(&header, &image.payload, options.speed);

    let gain = if options.amplify {
        amplify::amplify(&mut samples)
    } else {
        None
    };

    Ok(TapeAudio {
        samples,
        speed: options.speed,
        checksum,
        gain,
    })
}
