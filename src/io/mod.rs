// Purpose - external interfaces: WAV import and the playback seam

pub mod wav;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use wav::{import_wav, import_wav_with_info, WavInfo, WAV_NORMALIZE_DIVISOR};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Play through once, then return.
    #[default]
    Once,
    /// Repeat forever; `play` only returns on error.
    Loop,
}

/// Something that can turn a mono sample sequence into sound.
///
/// Implementations block the calling thread for the duration of playback.
pub trait SequencePlayer {
    type Error;

    fn play(&mut self, samples: &[f32], sample_rate: u32, mode: PlayMode)
        -> Result<(), Self::Error>;
}
