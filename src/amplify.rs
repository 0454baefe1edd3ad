//! Signal amplifier
//!
//! The tape waveforms only swing over roughly half of the 8-bit range. The
//! amplifier stretches a finished stream around the 128 midpoint so that the
//! louder side reaches the edge of the range without clipping the other.

/// Midpoint of unsigned 8-bit PCM
const MIDPOINT: f64 = 128.0;

/// Gain that stretches `samples` to the full range, if one is defined.
///
/// Each side of the midpoint limits the gain only when the stream actually
/// reaches that side. Returns `None` for a stream that never leaves the
/// midpoint (or is empty).
pub fn amplify_gain(samples: &[u8]) -> Option<f64> {
    let (min_level, max_level) = samples
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));

    let max_centered = max_level as f64 - MIDPOINT;
    let min_centered = min_level as f64 - MIDPOINT;

    let gain_high = (max_centered > 0.0).then(|| 128.0 / max_centered);
    let gain_low = (min_centered < 0.0).then(|| -127.0 / min_centered);

    match (gain_high, gain_low) {
        (Some(high), Some(low)) => Some(high.min(low)),
        (Some(gain), None) | (None, Some(gain)) => Some(gain),
        (None, None) => None,
    }
}

/// Round to the nearest integer, halves away from zero, with `[-0.5, 0.5]`
/// collapsing to zero.
#[inline]
fn round_level(value: f64) -> i32 {
    if value > 0.5 {
        (value + 0.5) as i32
    } else if value < -0.5 {
        (value - 0.5) as i32
    } else {
        0
    }
}

/// Rescale `samples` in place by `gain` around the midpoint.
pub fn apply_gain(samples: &mut [u8], gain: f64) {
    for sample in samples.iter_mut() {
        let scaled = round_level((*sample as f64 - MIDPOINT) * gain) + 128;
        *sample = scaled.clamp(0, 255) as u8;
    }
}

/// Amplify `samples` in place and return the gain applied.
///
/// A stream without any swing around the midpoint is left unchanged.
pub fn amplify(samples: &mut [u8]) -> Option<f64> {
    match amplify_gain(samples) {
        Some(gain) => {
            tracing::debug!(gain, "amplifying signal");
            apply_gain(samples, gain);
            Some(gain)
        }
        None => {
            tracing::warn!("signal has no amplitude around the midpoint, amplifier skipped");
            None
        }
    }
}
