//! Stateless sample generators and transforms.
//!
//! Every public function here borrows its input and hands back a freshly
//! allocated sequence, so a buffer can be fed into several chains without
//! being disturbed. Rate-dependent operations take a [`SignalCtx`] instead of
//! reading a global.
//!
//! [`SignalCtx`]: crate::SignalCtx

/// Gain and peak normalization.
pub mod amplify;
/// Silence padding at the start of a sequence.
pub mod delay;
/// Butterworth bandpass design and IIR filtering.
pub mod filter;
/// Combine several equal-length tracks sample by sample.
pub mod mix;
/// Sine, square and arbitrary-function generators.
pub mod oscillator;

pub use amplify::{scale_volume, set_volume};
pub use delay::delay_audio;
pub use filter::{
    bandpass, butter_bandpass, butter_bandpass_sos, lfilter, sosfilt, Biquad, TransferFunction,
};
pub use mix::{combine, CombineMode};
pub use oscillator::{arbitrary_wave, sine_wave, square_wave};
