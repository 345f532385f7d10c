//! feelwave - render the haptic feel waveform and loop it
//!
//! Run with: cargo run
//! Log level follows RUST_LOG (default: info).

mod player;

use feelwave::{
    analysis,
    io::{PlayMode, SequencePlayer},
    patch::FeelPatch,
    SignalCtx,
};
use log::info;

use player::CpalPlayer;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ctx = SignalCtx::default();
    let patch = FeelPatch::new();
    let audio = patch.render(&ctx)?;

    info!(
        "carrier {} Hz, gate {} Hz @ {:.0}%, envelope {} Hz",
        patch.carrier_hz,
        patch.gate_hz,
        patch.gate_duty * 100.0,
        patch.envelope_hz
    );
    info!(
        "{} samples, peak {:.3}, rms {:.3}, dominant {:.1} Hz",
        audio.len(),
        analysis::peak(&audio),
        analysis::rms(&audio),
        analysis::dominant_frequency(&audio, ctx.sample_rate).unwrap_or(0.0)
    );
    info!("Playing... Press Ctrl+C to stop");

    let mut player = CpalPlayer::new()?;
    player.play(&audio, ctx.sample_rate, PlayMode::Loop)
}
