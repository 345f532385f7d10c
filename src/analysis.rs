//! Numeric diagnostics for rendered sequences.
//!
//! Peak and RMS levels plus an FFT-based estimate of the dominant frequency,
//! used by the driver to summarize what it is about to play.

use rustfft::{num_complex::Complex, FftPlanner};

/// Largest absolute sample value, 0 for an empty slice.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// Root-mean-square level, 0 for an empty slice.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum2: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum2 / samples.len() as f64).sqrt() as f32
}

/// Frequency (Hz) of the strongest non-DC FFT bin.
///
/// The whole slice is analysed as one Hann-windowed frame, so resolution is
/// `sample_rate / len`. Returns `None` for fewer than two samples or when
/// every non-DC bin is zero.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32) -> Option<f32> {
    let len = samples.len();
    if len < 2 {
        return None;
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(len);

    // Hann window - reduces spectral leakage
    let denom = (len - 1) as f32;
    let mut buffer: Vec<Complex<f32>> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos());
            Complex::new(s * w, 0.0)
        })
        .collect();

    fft.process(&mut buffer);

    let (bin, magnitude) = buffer[1..=len / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm_sqr()))
        .fold((0, 0.0f32), |best, cur| if cur.1 > best.1 { cur } else { best });

    if magnitude <= 0.0 {
        return None;
    }

    Some(bin as f32 * sample_rate as f32 / len as f32)
}
