//! Render a few feel patch variations offline and print their levels.
//!
//! Run with: cargo run --example render_patch

use feelwave::{analysis, patch::FeelPatch, SignalCtx};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let ctx = SignalCtx::default();
    let variations = [
        ("default", FeelPatch::new()),
        ("fast gate", FeelPatch::new().gate(4.0, 0.25)),
        ("deep carrier", FeelPatch::new().carrier_hz(40.0).peak(0.5)),
        ("long", FeelPatch::new().duration(4.0).envelope_hz(0.25)),
    ];

    println!("{:<14} {:>8} {:>7} {:>7} {:>10}", "patch", "samples", "peak", "rms", "dominant");
    for (name, patch) in variations {
        let audio = patch.render(&ctx)?;
        let dominant = analysis::dominant_frequency(&audio, ctx.sample_rate).unwrap_or(0.0);
        println!(
            "{:<14} {:>8} {:>7.3} {:>7.3} {:>8.1} Hz",
            name,
            audio.len(),
            analysis::peak(&audio),
            analysis::rms(&audio),
            dominant
        );
    }

    Ok(())
}
