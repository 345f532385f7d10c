//! Import a 16-bit WAV file, bandpass it and compare levels before and after.
//!
//! Run with: cargo run --example bandpass_wav -- <file.wav> [low_hz] [high_hz]

use color_eyre::eyre::{eyre, WrapErr};
use feelwave::{
    analysis,
    dsp::{bandpass, filter::DEFAULT_FILTER_ORDER, set_volume},
    io::import_wav_with_info,
    SignalCtx,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| eyre!("usage: bandpass_wav <file.wav> [low_hz] [high_hz]"))?;
    let low: f64 = args.next().map_or(Ok(200.0), |s| s.parse()).wrap_err("bad low_hz")?;
    let high: f64 = args.next().map_or(Ok(2_000.0), |s| s.parse()).wrap_err("bad high_hz")?;

    let (audio, info) = import_wav_with_info(&path)?;
    let ctx = SignalCtx::new(info.sample_rate);

    println!("{path}: {} ch, {} Hz, {} frames", info.channels, info.sample_rate, info.frames);
    print_levels("input", &audio, &ctx);

    let filtered = bandpass(&ctx, &audio, low, high, DEFAULT_FILTER_ORDER)?;
    print_levels(&format!("{low}-{high} Hz"), &filtered, &ctx);

    let normalized = set_volume(&filtered, 0.5)?;
    print_levels("normalized", &normalized, &ctx);

    Ok(())
}

fn print_levels(label: &str, audio: &[f32], ctx: &SignalCtx) {
    println!(
        "  {label:<14} peak {:.3}  rms {:.3}  dominant {:.1} Hz",
        analysis::peak(audio),
        analysis::rms(audio),
        analysis::dominant_frequency(audio, ctx.sample_rate).unwrap_or(0.0)
    );
}
