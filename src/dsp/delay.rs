use crate::{Result, SignalCtx, SignalError};

/// Delay `audio` by `delay_s` seconds of leading silence.
///
/// `floor(delay_s · rate)` zeros are prepended. With `extend == false` the
/// tail is clipped so the result keeps the input length; with
/// `extend == true` the result grows by the padding.
pub fn delay_audio(
    ctx: &SignalCtx,
    audio: &[f32],
    delay_s: f64,
    extend: bool,
) -> Result<Vec<f32>> {
    if !delay_s.is_finite() || delay_s < 0.0 {
        return Err(SignalError::invalid("delay", delay_s));
    }

    let sample_delay = ctx.samples_for(delay_s);
    let len = if extend {
        audio
            .len()
            .checked_add(sample_delay)
            .ok_or_else(|| SignalError::invalid("delay", delay_s))?
    } else {
        audio.len()
    };

    let mut delayed = Vec::new();
    delayed
        .try_reserve_exact(len)
        .map_err(|_| SignalError::invalid("delay", delay_s))?;
    delayed.resize(sample_delay.min(len), 0.0);
    let keep = len - delayed.len();
    delayed.extend_from_slice(&audio[..keep]);

    Ok(delayed)
}
