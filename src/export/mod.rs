//! Audio export for assembled tape frames
//!
//! The BK-0010 tape reader expects unsigned 8-bit mono PCM at 11025 Hz
//! (22050 Hz in turbo mode). Only the WAV container is supported.
//!
//! # Examples
//!
//! ```no_run
//! use bkbin2wav::export::write_wav;
//! use bkbin2wav::TapeSpeed;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = vec![0x80u8; 1024];
//! let file = File::create("silence.wav")?;
//! write_wav(file, &samples, TapeSpeed::Normal)?;
//! # Ok(())
//! # }
//! ```

mod wav;

pub use wav::*;
