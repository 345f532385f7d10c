use std::f64::consts::TAU;

use log::debug;

use crate::{Result, SignalCtx, SignalError};

/*
| generator      | range      | period (samples)          |
| -------------- | ---------- | ------------------------- |
| arbitrary_wave | [-1, 1]    | whatever `f` does         |
| sine_wave      | [-1, 1]    | rate / freq (exact)       |
| square_wave    | {0, 1}     | floor(rate / freq)        |

The square period is truncated to a whole number of samples, so a 7 kHz
square at 44.1 kHz plays at 44100 / 6 = 7350 Hz. That quantization is
expected, not a bug.
*/

fn check_duration(duration_s: f64) -> Result<()> {
    if !duration_s.is_finite() || duration_s < 0.0 {
        return Err(SignalError::invalid("duration", duration_s));
    }
    Ok(())
}

fn check_frequency(freq_hz: f64) -> Result<()> {
    if !freq_hz.is_finite() || freq_hz <= 0.0 {
        return Err(SignalError::invalid("frequency", freq_hz));
    }
    Ok(())
}

/// Sample `f` at every index covering `duration_s` seconds.
///
/// Element `i` of the result is `f(i)`. The first value outside [-1, 1]
/// (NaN included) aborts generation with [`SignalError::RangeViolation`];
/// nothing of the partially built sequence is returned.
pub fn arbitrary_wave<F>(ctx: &SignalCtx, duration_s: f64, mut f: F) -> Result<Vec<f32>>
where
    F: FnMut(usize) -> f32,
{
    check_duration(duration_s)?;

    let len = ctx.samples_for(duration_s);
    let mut audio = Vec::new();
    audio
        .try_reserve_exact(len)
        .map_err(|_| SignalError::invalid("duration", duration_s))?;

    for index in 0..len {
        let value = f(index);
        if !(-1.0..=1.0).contains(&value) {
            return Err(SignalError::RangeViolation { index, value });
        }
        audio.push(value);
    }

    Ok(audio)
}

/// Sine wave `sin(2π · freq / rate · i)`.
pub fn sine_wave(ctx: &SignalCtx, freq_hz: f64, duration_s: f64) -> Result<Vec<f32>> {
    check_frequency(freq_hz)?;

    let omega = TAU * freq_hz / ctx.sample_rate as f64;
    arbitrary_wave(ctx, duration_s, |i| (omega * i as f64).sin() as f32)
}

/// Unipolar square wave: 1 for the first `duty` fraction of each period, 0
/// for the rest.
///
/// The comparison is inclusive, so a duty of 0 still produces a one-sample
/// pulse at the start of each period and a duty of 1 is constantly high.
pub fn square_wave(
    ctx: &SignalCtx,
    freq_hz: f64,
    duration_s: f64,
    duty: f64,
) -> Result<Vec<f32>> {
    check_frequency(freq_hz)?;
    if !(0.0..=1.0).contains(&duty) {
        return Err(SignalError::invalid("duty", duty));
    }

    let period = (ctx.sample_rate as f64 / freq_hz).floor() as usize;
    if period == 0 {
        return Err(SignalError::invalid("frequency", freq_hz));
    }

    debug!(
        "square wave: {freq_hz} Hz -> period {period} samples ({:.3} Hz actual)",
        ctx.sample_rate as f64 / period as f64
    );

    let high_until = duty * period as f64;
    arbitrary_wave(ctx, duration_s, |i| {
        if ((i % period) as f64) <= high_until {
            1.0
        } else {
            0.0
        }
    })
}
