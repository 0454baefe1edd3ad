//! BK-0010 character encoding for tape names
//!
//! ASCII passes through unchanged. Cyrillic letters occupy 0xC0..=0xFF in
//! KOI-7 N2 order (lower case first). Anything else becomes `.`.

/// Byte written for characters without a BK-0010 counterpart
pub const PLACEHOLDER: u8 = b'.';

/// Cyrillic lower case letters in BK-0010 order, codes 192..=223
const LOWER_CASE: [char; 32] = [
    'ю', 'а', 'б', 'ц', 'д', 'е', 'ф', 'г', 'х', 'и', 'й', 'к', 'л', 'м', 'н', 'о', //
    'п', 'я', 'р', 'с', 'т', 'у', 'ж', 'в', 'ь', 'ы', 'з', 'ш', 'э', 'щ', 'ч', 'ъ',
];

/// Cyrillic upper case letters in BK-0010 order, codes 224..=255
const UPPER_CASE: [char; 32] = [
    'Ю', 'А', 'Б', 'Ц', 'Д', 'Е', 'Ф', 'Г', 'Х', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', //
    'П', 'Я', 'Р', 'С', 'Т', 'У', 'Ж', 'В', 'Ь', 'Ы', 'З', 'Ш', 'Э', 'Щ', 'Ч', 'Ъ',
];

const LOWER_CASE_BASE: u8 = 0xC0;
const UPPER_CASE_BASE: u8 = 0xE0;

/// Map a single character to its BK-0010 code.
pub fn encode_char(ch: char) -> u8 {
    let code = ch as u32;
    if code <= 0x7F {
        return code as u8;
    }

    // ё/Ё share the codes of е/Е
    let ch = match ch {
        'ё' => 'е',
        'Ё' => 'Е',
        other => other,
    };

    if let Some(index) = LOWER_CASE.iter().position(|&c| c == ch) {
        LOWER_CASE_BASE + index as u8
    } else if let Some(index) = UPPER_CASE.iter().position(|&c| c == ch) {
        UPPER_CASE_BASE + index as u8
    } else {
        PLACEHOLDER
    }
}

/// Transcode text into BK-0010 bytes, one byte per character.
///
/// NUL has no use in a tape name and is dropped.
pub fn transcode(text: &str) -> Vec<u8> {
    text.chars()
        .map(encode_char)
        .filter(|&code| code != 0)
        .collect()
}

/// Replace control characters with [`PLACEHOLDER`].
///
/// Names taken from file names or other external sources may carry
/// characters the tape reader would interpret as terminal controls.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if (ch as u32) < 0x20 || ch == '\u{7F}' {
                PLACEHOLDER as char
            } else {
                ch
            }
        })
        .collect()
}
