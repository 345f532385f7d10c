use std::path::Path;

use log::{debug, warn};

use crate::{Result, SignalError};

/// Imported samples are divided by this, so a full-scale 16-bit file peaks
/// at about ±0.5 rather than ±1.0.
pub const WAV_NORMALIZE_DIVISOR: f32 = 65_536.0;

/// Header fields of an imported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    /// Samples per channel.
    pub frames: u32,
}

/// Read a 16-bit PCM WAV file into a floating-point sequence.
///
/// The sample stream is returned exactly as stored: multi-channel files stay
/// interleaved and the file's own sample rate is not checked against any
/// [`SignalCtx`](crate::SignalCtx).
pub fn import_wav(path: impl AsRef<Path>) -> Result<Vec<f32>> {
    import_wav_with_info(path).map(|(audio, _)| audio)
}

/// Like [`import_wav`], also returning the header fields.
pub fn import_wav_with_info(path: impl AsRef<Path>) -> Result<(Vec<f32>, WavInfo)> {
    let path = path.as_ref();
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(SignalError::UnsupportedFormat {
            bits_per_sample: spec.bits_per_sample,
            float: spec.sample_format == hound::SampleFormat::Float,
        });
    }

    let info = WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        frames: reader.duration(),
    };
    debug!(
        "importing {}: {} ch, {} Hz, {} frames",
        path.display(),
        info.channels,
        info.sample_rate,
        info.frames
    );
    if info.channels > 1 {
        warn!(
            "{} has {} channels; samples stay interleaved",
            path.display(),
            info.channels
        );
    }

    let audio = reader
        .samples::<i16>()
        .map(|s| s.map(|v| v as f32 / WAV_NORMALIZE_DIVISOR))
        .collect::<std::result::Result<Vec<f32>, hound::Error>>()?;

    Ok((audio, info))
}
