//! Tape checksum
//!
//! The BK-0010 tape loader sums payload bytes into a 16-bit word and folds
//! every carry out of bit 15 back in as +1 (end-around carry).

/// Compute the tape checksum of a payload.
///
/// Only the payload is summed; the tape header and the name are not part of it.
pub fn checksum(payload: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    for &byte in payload {
        sum += byte as u32;
        if sum > 0xFFFF {
            sum = (sum & 0xFFFF) + 1;
        }
    }
    sum as u16
}
