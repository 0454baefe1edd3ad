//! Error types for BIN parsing and tape encoding

/// Error type for BIN to tape conversion
#[derive(thiserror::Error, Debug)]
pub enum TapeError {
    /// The source is too short to hold the 4-byte BIN header
    #[error("BIN header is truncated: expected 4 bytes, got {available}")]
    TruncatedHeader {
        /// Number of bytes available in the source
        available: u64,
    },

    /// The computed payload length is zero or negative
    #[error("Detected wrong length value {length}, may be it is not a BIN file")]
    InvalidLength {
        /// Payload length computed from the header or the source size
        length: i64,
    },

    /// The source ends before the computed payload length
    #[error("BIN payload is truncated: expected {expected} byte(s), got {available}")]
    TruncatedPayload {
        /// Number of payload bytes requested
        expected: usize,
        /// Number of payload bytes present in the source
        available: usize,
    },

    /// The payload does not fit the 16-bit tape length field
    #[error("BIN payload of {length} byte(s) does not fit a 16-bit tape length")]
    PayloadTooLarge {
        /// Payload length in bytes
        length: u64,
    },

    /// The tape name is longer than 16 characters after transcoding
    #[error("Too long name for TAP file header ({chars} chars), must be less or equals 16 chars: {name}")]
    NameTooLong {
        /// Name as supplied by the caller
        name: String,
        /// Length of the transcoded name
        chars: usize,
    },

    /// The start address is not a 16-bit value
    #[error("Wrong start address: {0}")]
    InvalidStartAddress(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Error writing the audio container
    #[error("Audio file write error: {0}")]
    AudioFileError(String),

    /// IO error from the source or the sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for TapeError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => TapeError::Io(io),
            other => TapeError::AudioFileError(other.to_string()),
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, TapeError>;
