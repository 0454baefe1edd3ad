//! BK-0010 tape waveforms
//!
//! Every bit on tape is one fixed period of an 8-bit unsigned waveform, and
//! the synchronization marks are longer fixed periods. The tables below are
//! the exact sample patterns the BK-0010 tape reader expects at 11025 Hz
//! (22050 Hz in turbo mode, which just plays the same samples faster).

/// Waveform emitted for a 0 bit
const RESET: [u8; 12] = [
    0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, 0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40,
];

/// Waveform emitted for a 1 bit
const SET: [u8; 18] = [
    0x80, 0xa0, 0xb7, 0xc0, 0xb7, 0xa0, 0x80, 0x5f, 0x48, 0x3f, 0x48, 0x5f, 0x80, 0xb7, 0xb7,
    0x80, 0x48, 0x48,
];

/// Pilot tone preceding every synchro mark
const START_SYNCHRO: [u8; 48] = [
    0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, 0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, //
    0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, 0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, //
    0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, 0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, //
    0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40, 0x80, 0xbf, 0xbf, 0x80, 0x40, 0x40,
];

const SYNCHRO: [u8; 42] = [
    0x80, 0x90, 0x9d, 0xa4, 0xa6, 0xa9, 0xa9, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0x80, 0x6f, 0x62,
    0x5b, 0x57, 0x56, 0x55, 0x55, 0x55, 0x55, 0x55, 0x6e, 0x80, 0x9a, 0xa2, 0xa6, 0xa7, 0xa9,
    0x80, 0x6f, 0x63, 0x5c, 0x59, 0x59, 0x80, 0xb7, 0xb7, 0x80, 0x48, 0x48,
];

const END_MARKER: [u8; 64] = [
    0x80, 0x8f, 0xa8, 0xb5, 0xbc, 0xbf, 0xc1, 0xc1, 0xc2, 0xc2, 0xc2, 0xc2, 0xc2, 0xc1, 0xc1,
    0xc1, 0xc1, 0xc1, 0xc0, 0xc0, 0xc0, 0xc0, 0xc0, 0xbf, 0xbf, 0xbe, 0xbe, 0xbe, 0xbd, 0xbc,
    0xb2, 0x80, 0x59, 0x48, 0x40, 0x3b, 0x39, 0x38, 0x37, 0x37, 0x37, 0x37, 0x37, 0x38, 0x38,
    0x38, 0x38, 0x39, 0x39, 0x39, 0x39, 0x39, 0x3a, 0x3a, 0x3a, 0x3a, 0x3a, 0x3b, 0x3b, 0x3b,
    0x3b, 0x3c, 0x3e, 0x7a,
];

/// Named tape signals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Bit 0
    Reset,
    /// Bit 1
    Set,
    /// Pilot period before a synchro mark
    StartSynchro,
    /// Synchro mark
    Synchro,
    /// End of data marker
    EndMarker,
}

impl Signal {
    /// All signals, in table order
    pub const ALL: [Signal; 5] = [
        Signal::Reset,
        Signal::Set,
        Signal::StartSynchro,
        Signal::Synchro,
        Signal::EndMarker,
    ];

    /// Sample pattern of this signal
    pub fn waveform(self) -> &'static [u8] {
        match self {
            Signal::Reset => &RESET,
            Signal::Set => &SET,
            Signal::StartSynchro => &START_SYNCHRO,
            Signal::Synchro => &SYNCHRO,
            Signal::EndMarker => &END_MARKER,
        }
    }

    /// Number of samples in one period of this signal
    pub fn sample_count(self) -> usize {
        self.waveform().len()
    }

    /// Signal carrying a single data bit
    pub fn for_bit(bit: bool) -> Signal {
        if bit {
            Signal::Set
        } else {
            Signal::Reset
        }
    }
}

/// Number of samples [`SignalEncoder::byte`] emits for `value`
pub fn encoded_byte_len(value: u8) -> usize {
    let ones = value.count_ones() as usize;
    ones * Signal::Set.sample_count() + (8 - ones) * Signal::Reset.sample_count()
}

/// Appends tape waveforms to an owned sample stream.
#[derive(Debug, Default, Clone)]
pub struct SignalEncoder {
    samples: Vec<u8>,
}

impl SignalEncoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append the waveform of `signal` `times` times
    pub fn signal(&mut self, signal: Signal, times: usize) {
        let waveform = signal.waveform();
        self.samples.reserve(waveform.len() * times);
        for _ in 0..times {
            self.samples.extend_from_slice(waveform);
        }
    }

    /// Append one data bit
    #[inline]
    pub fn bit(&mut self, bit: bool) {
        self.samples
            .extend_from_slice(Signal::for_bit(bit).waveform());
    }

    /// Append one byte, least significant bit first
    pub fn byte(&mut self, value: u8) {
        for shift in 0..8 {
            self.bit((value >> shift) & 1 == 1);
        }
    }

    /// Append a 16-bit word, low byte first
    pub fn word(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.byte(low);
        self.byte(high);
    }

    /// Append every byte of `data` in order
    pub fn bytes(&mut self, data: &[u8]) {
        for &value in data {
            self.byte(value);
        }
    }

    /// Samples written so far
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Number of samples written so far
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Hand over the sample stream
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}
