use std::io::Cursor;

use bkbin2wav::signal::{Signal, SignalEncoder};
use bkbin2wav::tape::LEAD_IN_SYNCHRO_COUNT;
use bkbin2wav::{encode_bin, BinImage, EncodeOptions, LengthMode, TapeError, TapeSpeed};

fn bin(start: u16, length: u16, payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&start.to_le_bytes());
    data.extend_from_slice(&length.to_le_bytes());
    data.extend_from_slice(payload);
    data
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn convert(data: &[u8], options: &EncodeOptions) -> Vec<u8> {
    let image = BinImage::from_bytes(data, LengthMode::Declared).unwrap();
    encode_bin(&image, options).unwrap().to_wav_bytes().unwrap()
}

#[test]
fn normal_speed_wav() {
    let wav = convert(&bin(0x1000, 4, &[1, 2, 3, 4]), &EncodeOptions::default().name("TEST"));

    let reader = hound::WavReader::new(Cursor::new(&wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 11_025);
    assert_eq!(spec.bits_per_sample, 8);
    assert_eq!(spec.channels, 1);
    assert_eq!(reader.len(), 29_140);

    assert_eq!(le_u32(&wav, 40), 29_140);
    assert_eq!(le_u32(&wav, 4), 36 + 29_140);
}

#[test]
fn turbo_only_changes_rate_and_lead_out() {
    let data = bin(0x1000, 4, &[1, 2, 3, 4]);
    let normal = convert(&data, &EncodeOptions::default().name("TEST"));
    let turbo = convert(&data, &EncodeOptions::turbo().name("TEST"));

    assert_eq!(le_u32(&turbo, 24), 22_050);
    assert_eq!(le_u32(&turbo, 40), 30_676);

    // up to the final synchro the streams are identical
    let shared = 29_140 - Signal::Synchro.sample_count();
    assert_eq!(&turbo[44..44 + shared], &normal[44..44 + shared]);
}

#[test]
fn header_carries_name_and_address() {
    let image = BinImage::from_bytes(&bin(0o1000, 2, &[0x12, 0x34]), LengthMode::Declared).unwrap();
    let audio = encode_bin(&image, &EncodeOptions::default().name("Игра")).unwrap();

    let mut expected = SignalEncoder::new();
    expected.signal(Signal::StartSynchro, 1);
    expected.signal(Signal::Synchro, 1);
    expected.word(0o1000);
    expected.word(2);
    expected.bytes(&[233, 199, 210, 193]);
    expected.bytes(&[b' '; 12]);

    let start = (LEAD_IN_SYNCHRO_COUNT) * Signal::StartSynchro.sample_count()
        + Signal::Synchro.sample_count();
    assert_eq!(
        &audio.samples[start..start + expected.len()],
        expected.samples()
    );
}

#[test]
fn physical_length_mode_encodes_whole_file() {
    let data = bin(0x200, 1, &[1, 2, 3]);

    let declared = BinImage::from_bytes(&data, LengthMode::Declared).unwrap();
    let physical = BinImage::from_bytes(&data, LengthMode::Physical).unwrap();
    assert_eq!(declared.payload, vec![1]);
    assert_eq!(physical.payload, vec![1, 2, 3]);

    let declared = encode_bin(&declared, &EncodeOptions::default()).unwrap();
    let physical = encode_bin(&physical, &EncodeOptions::default()).unwrap();
    assert_eq!(declared.checksum, 1);
    assert_eq!(physical.checksum, 6);
}

#[test]
fn amplified_wav_uses_full_range() {
    let image = BinImage::from_bytes(&bin(0x1000, 4, &[1, 2, 3, 4]), LengthMode::Declared).unwrap();
    let plain = encode_bin(&image, &EncodeOptions::default()).unwrap();
    let loud = encode_bin(&image, &EncodeOptions::default().amplify(true)).unwrap();

    assert_eq!(plain.samples.len(), loud.samples.len());
    assert_eq!(plain.checksum, loud.checksum);
    let spread = |s: &[u8]| s.iter().max().unwrap() - s.iter().min().unwrap();
    assert!(spread(&loud.samples) > spread(&plain.samples));
    assert!(loud.samples.iter().all(|&s| s != 0));
}

#[test]
fn file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("DEMO.BIN");
    let output = dir.path().join("DEMO.wav");
    std::fs::write(&input, bin(0x1000, 4, &[1, 2, 3, 4])).unwrap();

    let image = BinImage::load(&input, LengthMode::Declared).unwrap();
    let options = EncodeOptions::default().speed(TapeSpeed::Turbo).name("DEMO");
    let audio = encode_bin(&image, &options).unwrap();
    audio.save(&output).unwrap();

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().sample_rate, 22_050);
    assert_eq!(reader.len() as usize, audio.samples.len());
}

#[test]
fn reader_errors() {
    assert!(matches!(
        BinImage::from_bytes(&[0, 0], LengthMode::Declared),
        Err(TapeError::TruncatedHeader { .. })
    ));
    assert!(matches!(
        BinImage::from_bytes(&bin(0, 0, &[1]), LengthMode::Declared),
        Err(TapeError::InvalidLength { .. })
    ));
    assert!(matches!(
        BinImage::from_bytes(&bin(0, 8, &[1]), LengthMode::Declared),
        Err(TapeError::TruncatedPayload { .. })
    ));
}
