//! Fixed waveform compositions.
//!
//! A [`FeelPatch`] describes the haptic "feel" signal: an audio-rate sine
//! carrier, gated on and off by a slow square wave, and shaped by a slow sine
//! envelope. The three are multiplied together and peak-normalized.

use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    analysis,
    dsp::{combine, set_volume, sine_wave, square_wave, CombineMode},
    io::{PlayMode, SequencePlayer},
    Result, SignalCtx, SignalError,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeelPatch {
    pub carrier_hz: f64,
    pub gate_hz: f64,
    pub gate_duty: f64,
    pub envelope_hz: f64,
    pub duration_s: f64,
    /// Magnitude of the loudest sample after normalization.
    pub peak: f32,
}

impl FeelPatch {
    /// 60 Hz carrier, 1 Hz half-duty gate, 1 Hz envelope, one second long,
    /// normalized to 0.25.
    pub fn new() -> Self {
        Self {
            carrier_hz: 60.0,
            gate_hz: 1.0,
            gate_duty: 0.5,
            envelope_hz: 1.0,
            duration_s: 1.0,
            peak: 0.25,
        }
    }

    pub fn carrier_hz(mut self, hz: f64) -> Self {
        self.carrier_hz = hz;
        self
    }

    /// Set the gate frequency and the fraction of each gate period that is on
    pub fn gate(mut self, hz: f64, duty: f64) -> Self {
        self.gate_hz = hz;
        self.gate_duty = duty;
        self
    }

    pub fn envelope_hz(mut self, hz: f64) -> Self {
        self.envelope_hz = hz;
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration_s = seconds;
        self
    }

    pub fn peak(mut self, magnitude: f32) -> Self {
        self.peak = magnitude;
        self
    }

    /// Render the patch at `ctx`'s sample rate.
    pub fn render(&self, ctx: &SignalCtx) -> Result<Vec<f32>> {
        let carrier = sine_wave(ctx, self.carrier_hz, self.duration_s)?;
        let gate = square_wave(ctx, self.gate_hz, self.duration_s, self.gate_duty)?;
        let envelope = sine_wave(ctx, self.envelope_hz, self.duration_s)?;

        let combined = combine(&[carrier, gate, envelope], CombineMode::Multiply)?;
        let audio = set_volume(&combined, self.peak)?;

        debug!(
            "rendered feel patch: {} samples, peak {:.3}, rms {:.3}",
            audio.len(),
            analysis::peak(&audio),
            analysis::rms(&audio)
        );

        Ok(audio)
    }

    /// Render and hand the result to `player`.
    pub fn play<P>(
        &self,
        ctx: &SignalCtx,
        player: &mut P,
        mode: PlayMode,
    ) -> std::result::Result<(), P::Error>
    where
        P: SequencePlayer,
        P::Error: From<SignalError>,
    {
        let audio = self.render(ctx)?;

        info!(
            "playing {:.2} s feel patch ({:?})",
            audio.len() as f64 / ctx.sample_rate as f64,
            mode
        );
        player.play(&audio, ctx.sample_rate, mode)
    }
}

impl Default for FeelPatch {
    fn default() -> Self {
        Self::new()
    }
}
