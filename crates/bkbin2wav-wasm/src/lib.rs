//! WebAssembly bindings for bkbin2wav
//!
//! Converts a BK-0010 `.BIN` snapshot into a WAV file inside the browser.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! import init, { makeWavFromBk0010Bin } from './bkbin2wav_wasm.js';
//!
//! async function convert(binData) {
//!     await init();
//!
//!     const wav = makeWavFromBk0010Bin(binData, {
//!         useFileSize: false,
//!         amplify: true,
//!         turbo: false,
//!         name: "GAME",
//!     });
//!     return new Blob([wav], { type: "audio/wav" });
//! }
//! ```

#![warn(missing_docs)]

use bkbin2wav::{encode_bin, BinImage, EncodeOptions, LengthMode, TapeSpeed, TAPE_NAME_LEN};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Log to browser console
macro_rules! console_log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into());
    }
}

/// Conversion options passed from JavaScript
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Take the payload size from the data instead of the BIN header
    pub use_file_size: bool,
    /// Amplify the signal
    pub amplify: bool,
    /// Turbo mode
    pub turbo: bool,
    /// Tape name, 1 to 16 characters
    pub name: String,
    /// Start address override; absent or negative keeps the BIN value
    pub start_address: Option<i64>,
}

/// Result of a conversion with the notes worth reporting to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// WAV file bytes
    pub wav: Vec<u8>,
    /// Checksum written on tape
    pub checksum: u16,
    /// Informational messages about the input
    pub notes: Vec<String>,
}

/// Convert BIN bytes into a WAV file.
///
/// Errors carry the message shown to the JavaScript caller.
pub fn convert(data: &[u8], options: &ConvertOptions) -> Result<Conversion, String> {
    let mode = LengthMode::from_file_size_flag(options.use_file_size);
    let image = BinImage::from_bytes(data, mode)
        .map_err(|e| format!("error during parse BIN format: {}", e))?;

    let mut notes = Vec::new();
    if options.use_file_size {
        notes.push(format!(
            "Detected flag to enforce physical file size (size defined inside of .BIN is {} byte(s), real size is {} byte(s))",
            image.declared_length,
            image.payload.len()
        ));
    } else if !image.length_matches() {
        notes.push(format!(
            "Detected different size defined in BIN header ({} != {})",
            image.declared_length, image.physical_length
        ));
    }

    let start_address = match options.start_address {
        Some(address) if address >= 0 => u16::try_from(address)
            .map_err(|_| format!("Wrong start address: {}", address))?,
        _ => image.start_address,
    };
    if start_address != image.start_address {
        notes.push(format!(
            "The Start address has been changed from {0}(&O{0:o}) to {1}(&O{1:o})",
            image.start_address, start_address
        ));
    }

    let name_chars = options.name.chars().count();
    if name_chars == 0 || name_chars > TAPE_NAME_LEN {
        return Err(format!("illegal tape file name: {}", options.name));
    }

    let encode_options = EncodeOptions::default()
        .speed(TapeSpeed::from_turbo(options.turbo))
        .amplify(options.amplify)
        .name(options.name.as_str())
        .start_address(start_address);

    let audio = encode_bin(&image, &encode_options)
        .map_err(|e| format!("error during WAV write: {}", e))?;
    let wav = audio
        .to_wav_bytes()
        .map_err(|e| format!("error during WAV write: {}", e))?;

    Ok(Conversion {
        wav,
        checksum: audio.checksum,
        notes,
    })
}

/// Convert a `.BIN` snapshot into WAV bytes
///
/// # Arguments
///
/// * `data` - BIN file data as Uint8Array
/// * `options` - `{ useFileSize, amplify, turbo, name, startAddress? }`
#[wasm_bindgen(js_name = makeWavFromBk0010Bin)]
pub fn make_wav_from_bk0010_bin(data: &[u8], options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options: ConvertOptions = if options.is_undefined() || options.is_null() {
        ConvertOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("illegal options: {}", e)))?
    };

    console_log!("Received {} bytes", data.len());

    let conversion = convert(data, &options).map_err(|e| JsValue::from_str(&e))?;
    for note in &conversion.notes {
        console_log!("{}", note);
    }
    console_log!(
        "Generated WAV data {} bytes, checksum #{:X}",
        conversion.wav.len(),
        conversion.checksum
    );

    Ok(conversion.wav)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(start: u16, length: u16, payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&start.to_le_bytes());
        data.extend_from_slice(&length.to_le_bytes());
        data.extend_from_slice(payload);
        data
    }

    fn options(name: &str) -> ConvertOptions {
        ConvertOptions {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert() {
        let conversion = convert(&bin(0x1000, 4, &[1, 2, 3, 4]), &options("TEST")).unwrap();
        assert_eq!(conversion.wav.len(), 44 + 29_140);
        assert_eq!(&conversion.wav[0..4], b"RIFF");
        assert_eq!(conversion.checksum, 0x000A);
        assert!(conversion.notes.is_empty());
    }

    #[test]
    fn test_name_must_be_present_and_short() {
        let data = bin(0x1000, 1, &[1]);
        let err = convert(&data, &options("")).unwrap_err();
        assert_eq!(err, "illegal tape file name: ");

        let err = convert(&data, &options("SEVENTEEN_CHARS!!")).unwrap_err();
        assert!(err.starts_with("illegal tape file name: "));
    }

    #[test]
    fn test_bad_bin_reports_parse_error() {
        let err = convert(&[1, 2], &options("X")).unwrap_err();
        assert!(err.starts_with("error during parse BIN format: "), "{err}");
    }

    #[test]
    fn test_notes_for_overrides() {
        let opts = ConvertOptions {
            use_file_size: true,
            start_address: Some(0o1000),
            ..options("X")
        };
        let conversion = convert(&bin(0x1000, 1, &[1, 2]), &opts).unwrap();
        assert_eq!(conversion.notes.len(), 2);
        assert!(conversion.notes[1].contains("to 512(&O1000)"));

        let keep = ConvertOptions {
            start_address: Some(-1),
            ..options("X")
        };
        let conversion = convert(&bin(0x1000, 1, &[1]), &keep).unwrap();
        assert!(conversion.notes.is_empty());

        let wrong = ConvertOptions {
            start_address: Some(0x10000),
            ..options("X")
        };
        assert!(convert(&bin(0x1000, 1, &[1]), &wrong).is_err());
    }

    #[test]
    fn test_length_mismatch_note() {
        let conversion = convert(&bin(0x1000, 1, &[1, 2, 3]), &options("X")).unwrap();
        assert_eq!(
            conversion.notes,
            vec!["Detected different size defined in BIN header (1 != 3)".to_string()]
        );
    }
}
