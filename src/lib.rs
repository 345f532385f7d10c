pub mod analysis; // Peak, RMS and spectral diagnostics
pub mod context;
pub mod dsp;
pub mod error;
pub mod io;
pub mod patch; // Fixed waveform compositions

pub use context::{SignalCtx, DEFAULT_SAMPLE_RATE};
pub use error::{Result, SignalError};
