//! Encoder configuration

use crate::charset;
use crate::error::{Result, TapeError};
use crate::tape::TAPE_NAME_LEN;
use serde::{Deserialize, Serialize};

/// Tape playback speed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapeSpeed {
    /// Standard BK-0010 speed (11025 Hz)
    #[default]
    Normal,
    /// Double frequency "turbo" mode (22050 Hz)
    Turbo,
}

impl TapeSpeed {
    /// Pick the speed from the turbo flag
    pub fn from_turbo(turbo: bool) -> Self {
        if turbo {
            TapeSpeed::Turbo
        } else {
            TapeSpeed::Normal
        }
    }

    /// WAV sample rate in Hz
    pub fn sample_rate(self) -> u32 {
        match self {
            TapeSpeed::Normal => 11_025,
            TapeSpeed::Turbo => 22_050,
        }
    }

    /// Number of pilot periods after the end marker
    pub fn trailer_synchro_count(self) -> usize {
        match self {
            TapeSpeed::Normal => 32,
            TapeSpeed::Turbo => 64,
        }
    }
}

/// Options for [`encode_bin`](crate::encode_bin)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeOptions {
    /// Playback speed
    pub speed: TapeSpeed,
    /// Stretch the signal to the full 8-bit range
    pub amplify: bool,
    /// Name stored in the tape header (at most 16 characters)
    pub name: String,
    /// Start address written to the tape header instead of the BIN one
    pub start_address: Option<u16>,
}

impl EncodeOptions {
    /// Create options for turbo mode
    pub fn turbo() -> Self {
        Self {
            speed: TapeSpeed::Turbo,
            ..Default::default()
        }
    }

    /// Set the playback speed
    pub fn speed(mut self, speed: TapeSpeed) -> Self {
        self.speed = speed;
        self
    }

    /// Enable the amplifier
    pub fn amplify(mut self, enable: bool) -> Self {
        self.amplify = enable;
        self
    }

    /// Set the tape name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the start address
    pub fn start_address(mut self, address: u16) -> Self {
        self.start_address = Some(address);
        self
    }

    /// Check the options before any encoding work starts.
    pub fn validate(&self) -> Result<()> {
        let chars = charset::transcode(&charset::sanitize_name(&self.name)).len();
        if chars > TAPE_NAME_LEN {
            return Err(TapeError::NameTooLong {
                name: self.name.clone(),
                chars,
            });
        }
        Ok(())
    }
}

/// Parse a start address given as decimal, `0x` hex or `0o` octal.
///
/// BK-0010 documentation writes addresses in octal, so a leading `0` alone
/// is not treated as an octal prefix to keep plain decimal input unambiguous.
pub fn parse_address(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(octal) = lower.strip_prefix("0o") {
        u32::from_str_radix(octal, 8)
    } else {
        lower.parse::<u32>()
    };

    match parsed {
        Ok(value) => u16::try_from(value)
            .map_err(|_| TapeError::InvalidStartAddress(trimmed.to_string())),
        Err(_) => Err(TapeError::InvalidStartAddress(trimmed.to_string())),
    }
}
