//! Gain and peak normalization.

/*
Gain
====

    output[i] = input[i] × gain

  gain > 1.0  →  louder
  gain = 1.0  →  unchanged
  gain < 1.0  →  quieter
  gain < 0.0  →  polarity inverted

Nothing here clamps. A sequence scaled past ±1.0 stays there and the caller
decides whether that is acceptable before it reaches a playback sink.


Peak Normalization
==================

set_volume() picks the sample with the largest magnitude and scales the
whole sequence so that sample lands on the requested magnitude:

    peak   = min if |min| > max else max     (signed)
    scalar = magnitude / peak

Because `peak` keeps its sign, a sequence whose loudest sample is negative
comes out inverted: [-0.8, 0.4] normalized to 0.5 becomes [0.5, -0.25].
The magnitude profile is what matters for the haptic use case, so the
polarity flip is kept.

A silent sequence has no peak to scale and is rejected.
*/

use log::debug;

use crate::{Result, SignalError};

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Return a copy of `audio` with every sample multiplied by `scalar`.
pub fn scale_volume(audio: &[f32], scalar: f32) -> Vec<f32> {
    let mut scaled = audio.to_vec();
    apply_gain(&mut scaled, scalar);
    scaled
}

/// Signed sample with the largest magnitude, `None` for an empty slice.
///
/// Ties between `|min|` and `max` resolve to `max`.
pub fn signed_peak(audio: &[f32]) -> Option<f32> {
    if audio.is_empty() {
        return None;
    }

    let (min, max) = audio
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });

    Some(if min.abs() > max { min } else { max })
}

/// Scale `audio` so its largest-magnitude sample has absolute value
/// `magnitude`.
///
/// Fails with [`SignalError::DivisionByZero`] when the peak is zero (silent
/// or empty input).
pub fn set_volume(audio: &[f32], magnitude: f32) -> Result<Vec<f32>> {
    let peak = signed_peak(audio).unwrap_or(0.0);
    if peak == 0.0 {
        return Err(SignalError::DivisionByZero);
    }

    let scalar = magnitude / peak;
    debug!("set_volume: peak {peak} -> {magnitude} (scalar {scalar})");

    Ok(scale_volume(audio, scalar))
}
