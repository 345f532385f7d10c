#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sample rate used when nothing else is requested.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Context threaded through every generator, delay and filter call.
///
/// Sequences carry no rate metadata of their own; whoever produced a buffer
/// and whoever consumes it must agree on the same `SignalCtx`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalCtx {
    pub sample_rate: u32,
}

impl SignalCtx {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Number of whole samples covering `seconds` (truncated toward zero).
    #[inline]
    pub fn samples_for(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64).floor() as usize
    }

    #[inline]
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate as f64
    }
}

impl Default for SignalCtx {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}
