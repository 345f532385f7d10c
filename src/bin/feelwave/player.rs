//! cpal-backed playback sink

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, Report, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use log::{error, info, warn};

use feelwave::io::{PlayMode, SequencePlayer};

/// Plays mono sequences on the default output device, copying each sample
/// to every channel.
pub struct CpalPlayer {
    device: cpal::Device,
}

impl CpalPlayer {
    pub fn new() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;

        if let Ok(name) = device.name() {
            info!("output device: {name}");
        }

        Ok(Self { device })
    }

    /// First f32 config whose rate range covers `sample_rate`.
    fn stream_config(&self, sample_rate: u32) -> EyreResult<StreamConfig> {
        let rate = SampleRate(sample_rate);
        let range = self
            .device
            .supported_output_configs()
            .wrap_err("failed to query supported output configs")?
            .filter(|c| c.sample_format() == SampleFormat::F32)
            .find(|c| c.min_sample_rate() <= rate && rate <= c.max_sample_rate())
            .ok_or_else(|| eyre!("output device cannot play f32 audio at {sample_rate} Hz"))?;

        Ok(range.with_sample_rate(rate).config())
    }
}

/// Position of the callback within a sequence.
///
/// In [`PlayMode::Once`] the sequence counts as done only once a whole buffer
/// has gone out as silence, so the buffer carrying the last real samples is
/// already with the device when the caller is released.
struct PlaybackCursor {
    audio: Arc<[f32]>,
    position: usize,
    mode: PlayMode,
}

impl PlaybackCursor {
    fn new(audio: Arc<[f32]>, mode: PlayMode) -> Self {
        Self {
            audio,
            position: 0,
            mode,
        }
    }

    /// Fill an interleaved buffer, each sample copied to every channel.
    /// Returns `true` when the buffer was silence from start to end.
    fn fill(&mut self, data: &mut [f32], channels: usize) -> bool {
        let drained = self.position >= self.audio.len();

        for frame in data.chunks_mut(channels.max(1)) {
            let sample = match self.audio.get(self.position) {
                Some(&s) => {
                    self.position += 1;
                    if self.position == self.audio.len() && self.mode == PlayMode::Loop {
                        self.position = 0;
                    }
                    s
                }
                None => 0.0,
            };
            frame.fill(sample);
        }

        drained
    }
}

impl SequencePlayer for CpalPlayer {
    type Error = Report;

    fn play(&mut self, samples: &[f32], sample_rate: u32, mode: PlayMode) -> EyreResult<()> {
        if samples.is_empty() {
            warn!("nothing to play");
            return Ok(());
        }

        let config = self.stream_config(sample_rate)?;
        let channels = config.channels as usize;
        info!("stream: {} Hz, {} channels", sample_rate, channels);

        let mut cursor = PlaybackCursor::new(Arc::from(samples), mode);
        let finished = Arc::new(AtomicBool::new(false));
        let finished_cb = finished.clone();
        let buffer_frames = Arc::new(AtomicUsize::new(0));
        let buffer_frames_cb = buffer_frames.clone();

        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    buffer_frames_cb.store(data.len() / channels.max(1), Ordering::Relaxed);
                    if cursor.fill(data, channels) {
                        finished_cb.store(true, Ordering::Release);
                    }
                },
                |err| error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start playback")?;

        // Loop mode never finishes; the process is stopped from outside
        while !finished.load(Ordering::Acquire) {
            thread::sleep(Duration::from_millis(50));
        }

        // let the device drain the silent buffer queued behind the tail
        let frames = buffer_frames.load(Ordering::Relaxed);
        thread::sleep(Duration::from_secs_f64(frames as f64 / sample_rate as f64));

        Ok(())
    }
}
