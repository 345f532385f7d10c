//! Sample-by-sample combination of several tracks.

/*
Combining Tracks
================

For every index i, walk the tracks in order and fold their values into an
accumulator:

    Multiply:  acc = 1;  acc = track[j][i] × acc   for j in 0..n
    Add:       acc = 0;  acc = track[j][i] + acc   for j in 0..n

Multiplying is how the feel waveform is built: a 60 Hz carrier gated by a
1 Hz square and shaped by a 1 Hz sine envelope. Each factor stays in
[-1, 1], so the product does too.

Adding does NOT stay in range. Two full-scale tracks sum to ±2.0, so a sum
usually wants set_volume() afterwards.

All tracks must be the same length. The check happens up front: a mismatch
is reported, never silently truncated.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, SignalError};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    Multiply,
    Add,
}

impl CombineMode {
    /// Resolve a pair of multiply/add switches into a mode.
    ///
    /// Exactly one switch must be on; anything else is
    /// [`SignalError::InvalidMode`].
    pub fn from_flags(multiply: bool, add: bool) -> Result<Self> {
        match (multiply, add) {
            (true, false) => Ok(CombineMode::Multiply),
            (false, true) => Ok(CombineMode::Add),
            _ => Err(SignalError::InvalidMode { multiply, add }),
        }
    }

    #[inline]
    fn identity(self) -> f32 {
        match self {
            CombineMode::Multiply => 1.0,
            CombineMode::Add => 0.0,
        }
    }

    #[inline]
    fn accumulate(self, acc: f32, sample: f32) -> f32 {
        match self {
            CombineMode::Multiply => sample * acc,
            CombineMode::Add => sample + acc,
        }
    }
}

/// Combine equal-length tracks into a new sequence.
///
/// # Errors
/// * [`SignalError::EmptyInput`] when `tracks` is empty
/// * [`SignalError::LengthMismatch`] when any track differs in length from
///   the first
pub fn combine<S: AsRef<[f32]>>(tracks: &[S], mode: CombineMode) -> Result<Vec<f32>> {
    let first = tracks.first().ok_or(SignalError::EmptyInput)?.as_ref();
    let expected = first.len();

    for (track, audio) in tracks.iter().enumerate().skip(1) {
        let found = audio.as_ref().len();
        if found != expected {
            return Err(SignalError::LengthMismatch {
                track,
                expected,
                found,
            });
        }
    }

    let mut out = vec![mode.identity(); expected];
    for audio in tracks {
        for (o, &s) in out.iter_mut().zip(audio.as_ref()) {
            *o = mode.accumulate(*o, s);
        }
    }

    Ok(out)
}
