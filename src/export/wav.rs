//! WAV container writer

use crate::options::TapeSpeed;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

/// Size of the RIFF, `fmt ` and `data` headers in front of the samples
pub const WAV_HEADER_LEN: usize = 44;

/// Format of the tape audio: unsigned 8-bit mono PCM
pub fn tape_wav_spec(speed: TapeSpeed) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: speed.sample_rate(),
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write `samples` as a WAV file into `sink`.
///
/// The sink must be positioned at its start: the RIFF and data sizes are
/// patched in place once all samples are written.
pub fn write_wav<W: Write + Seek>(sink: W, samples: &[u8], speed: TapeSpeed) -> Result<()> {
    let mut writer = hound::WavWriter::new(sink, tape_wav_spec(speed))?;

    // hound takes 8-bit samples as signed and stores them offset by 128
    for &sample in samples {
        writer.write_sample((sample as i16 - 128) as i8)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Render `samples` into an in-memory WAV file
pub fn to_wav_bytes(samples: &[u8], speed: TapeSpeed) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + samples.len()));
    write_wav(&mut cursor, samples, speed)?;
    Ok(cursor.into_inner())
}

/// Write `samples` into a new WAV file at `path`
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[u8], speed: TapeSpeed) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_wav(BufWriter::new(file), samples, speed)
}
