use std::f64::consts::PI;

use log::debug;
use rustfft::num_complex::Complex;

use crate::{Result, SignalCtx, SignalError};

/*
Butterworth Bandpass Design
===========================

Edges are given in Hz and normalized by Nyquist (fs / 2), so 0 < Wn < 1.
The design happens in zero/pole/gain form:

  1. analog lowpass prototype     N poles on the left half unit circle
  2. pre-warp                     w = 4 · tan(π · Wn / 2)
  3. lowpass → bandpass           each pole splits into two around
                                  w0 = sqrt(w_lo · w_hi), width bw = w_hi - w_lo;
                                  N zeros land at s = 0
  4. bilinear transform (fs = 2)  z = (4 + s) / (4 - s);
                                  s = 0 zeros map to z = 1, the N zeros
                                  at infinity map to z = -1

From there it goes one of two ways:

  * butter_bandpass()       b = k · poly(zeros), a = poly(poles), 2N + 1 taps
  * butter_bandpass_sos()   N biquads, one conjugate pole pair each, with
                            numerator (1 - z⁻²) and k folded into the first

The single polynomial is only usable for small orders or wide bands. Low,
narrow bands pack all 2N poles next to z = 1 and expanding them loses the
precision that keeps the roots inside the unit circle: at order 5, 100-400
Hz at 44.1 kHz already blows up to inf. bandpass() always runs the cascade,
which has no such limit.
*/

/// Butterworth order used when the caller has no preference.
pub const DEFAULT_FILTER_ORDER: usize = 5;

/// Poles closer to the real axis than this are treated as real when pairing.
const REAL_POLE_TOLERANCE: f64 = 1e-10;

/// Digital filter in polynomial form, `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

/// Second-order section, direct form II transposed.
///
/// Coefficients follow the [`TransferFunction`] convention with `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Biquad {
    pub b: [f64; 3],
    pub a: [f64; 3],
    z1: f64,
    z2: f64,
}

impl Biquad {
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        Self {
            b,
            a,
            z1: 0.0,
            z2: 0.0,
        }
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.z1;
        self.z1 = self.b[1] * input - self.a[1] * output + self.z2;
        self.z2 = self.b[2] * input - self.a[2] * output;
        output
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

struct Zpk {
    zeros: Vec<Complex<f64>>,
    poles: Vec<Complex<f64>>,
    gain: f64,
}

/// Coefficients of `prod(x - r)`, highest power first. Imaginary parts are
/// dropped; the roots come in conjugate pairs so they cancel.
fn poly(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for &r in roots {
        coeffs.push(Complex::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= r * prev;
        }
    }
    coeffs.into_iter().map(|c| c.re).collect()
}

fn design_zpk(ctx: &SignalCtx, low_hz: f64, high_hz: f64, order: usize) -> Result<Zpk> {
    let nyq = ctx.nyquist();
    if !low_hz.is_finite() || low_hz <= 0.0 {
        return Err(SignalError::invalid("low_hz", low_hz));
    }
    if !high_hz.is_finite() || high_hz <= low_hz || high_hz >= nyq {
        return Err(SignalError::invalid("high_hz", high_hz));
    }
    if order == 0 {
        return Err(SignalError::invalid("order", 0u32));
    }

    let n = order as f64;
    let low = low_hz / nyq;
    let high = high_hz / nyq;

    let prototype: Vec<Complex<f64>> = (0..order)
        .map(|k| {
            let m = 1.0 - n + 2.0 * k as f64;
            -Complex::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    // fs = 2 throughout, hence fs2 = 4
    let fs2 = 4.0;
    let warped_low = fs2 * (PI * low / 2.0).tan();
    let warped_high = fs2 * (PI * high / 2.0).tan();
    let bw = warped_high - warped_low;
    let w0_sq = warped_low * warped_high;

    let mut analog_poles = Vec::with_capacity(2 * order);
    for &p in &prototype {
        let p_lp = p * (bw / 2.0);
        let root = (p_lp * p_lp - w0_sq).sqrt();
        analog_poles.push(p_lp + root);
        analog_poles.push(p_lp - root);
    }
    let analog_gain = bw.powi(order as i32);

    let poles: Vec<Complex<f64>> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let mut zeros = vec![Complex::new(1.0, 0.0); order];
    zeros.extend(std::iter::repeat(Complex::new(-1.0, 0.0)).take(order));

    // analog zeros all sit at s = 0, each contributing (fs2 - 0)
    let denom = analog_poles
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (fs2 - p));
    let gain = analog_gain * (Complex::new(fs2.powi(order as i32), 0.0) / denom).re;

    Ok(Zpk { zeros, poles, gain })
}

/// Design a digital Butterworth bandpass passing `low_hz..high_hz` as a
/// single transfer function.
///
/// Fine for inspecting coefficients and for low orders; see
/// [`butter_bandpass_sos`] for anything that has to stay stable.
pub fn butter_bandpass(
    ctx: &SignalCtx,
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> Result<TransferFunction> {
    let zpk = design_zpk(ctx, low_hz, high_hz, order)?;

    let b: Vec<f64> = poly(&zpk.zeros).into_iter().map(|c| c * zpk.gain).collect();
    let a = poly(&zpk.poles);

    debug!(
        "butter_bandpass: {low_hz}-{high_hz} Hz, order {order}, {} taps",
        b.len()
    );

    Ok(TransferFunction { b, a })
}

/// Design the same Butterworth bandpass as [`butter_bandpass`], split into
/// `order` second-order sections.
///
/// Sections are ordered by pole radius, the pair nearest the unit circle
/// last; the overall gain sits in the first section.
pub fn butter_bandpass_sos(
    ctx: &SignalCtx,
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> Result<Vec<Biquad>> {
    let zpk = design_zpk(ctx, low_hz, high_hz, order)?;

    // (a1, a2) per section
    let mut denominators = Vec::with_capacity(order);
    let mut real = Vec::new();
    for p in &zpk.poles {
        if p.im > REAL_POLE_TOLERANCE {
            denominators.push((-2.0 * p.re, p.norm_sqr()));
        } else if p.im.abs() <= REAL_POLE_TOLERANCE {
            real.push(p.re);
        }
    }
    for pair in real.chunks(2) {
        match *pair {
            [r1, r2] => denominators.push((-(r1 + r2), r1 * r2)),
            [r] => denominators.push((-r, 0.0)),
            _ => {}
        }
    }
    if denominators.len() != order {
        return Err(SignalError::invalid("order", order as f64));
    }
    denominators.sort_by(|x, y| x.1.abs().total_cmp(&y.1.abs()));

    // each section takes one zero at z = 1 and one at z = -1
    let sections: Vec<Biquad> = denominators
        .into_iter()
        .enumerate()
        .map(|(i, (a1, a2))| {
            let k = if i == 0 { zpk.gain } else { 1.0 };
            Biquad::new([k, 0.0, -k], [1.0, a1, a2])
        })
        .collect();

    debug!("butter_bandpass_sos: {low_hz}-{high_hz} Hz, order {order}, {order} sections");

    Ok(sections)
}

/// Run `data` through `tf` (direct form II transposed, zero initial state).
///
/// No stability check: a badly conditioned `tf` gives non-finite output.
pub fn lfilter(tf: &TransferFunction, data: &[f32]) -> Vec<f32> {
    let taps = tf.b.len().max(tf.a.len());
    let a0 = tf.a.first().copied().unwrap_or(1.0);

    let mut b = vec![0.0; taps];
    let mut a = vec![0.0; taps];
    for (dst, &src) in b.iter_mut().zip(&tf.b) {
        *dst = src / a0;
    }
    for (dst, &src) in a.iter_mut().zip(&tf.a) {
        *dst = src / a0;
    }

    let mut state = vec![0.0f64; taps.saturating_sub(1)];
    let mut out = Vec::with_capacity(data.len());

    for &sample in data {
        let x = sample as f64;
        let y = b[0] * x + state.first().copied().unwrap_or(0.0);

        for i in 0..state.len() {
            let next = state.get(i + 1).copied().unwrap_or(0.0);
            state[i] = b[i + 1] * x + next - a[i + 1] * y;
        }

        out.push(y as f32);
    }

    out
}

/// Run `data` through a cascade of sections, each starting from rest.
pub fn sosfilt(sections: &[Biquad], data: &[f32]) -> Vec<f32> {
    let mut cascade = sections.to_vec();
    cascade.iter_mut().for_each(Biquad::reset);

    data.iter()
        .map(|&sample| {
            cascade
                .iter_mut()
                .fold(sample as f64, |x, section| section.process(x)) as f32
        })
        .collect()
}

/// Bandpass `audio` between `low_hz` and `high_hz` with a Butterworth filter
/// of the given order. The output has the same length as the input.
pub fn bandpass(
    ctx: &SignalCtx,
    audio: &[f32],
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> Result<Vec<f32>> {
    let sections = butter_bandpass_sos(ctx, low_hz, high_hz, order)?;
    Ok(sosfilt(&sections, audio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::sine_wave;

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(4_000);
        buffer[skip..]
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn filtered_peak(freq: f64) -> f32 {
        let ctx = SignalCtx::default();
        let tone = sine_wave(&ctx, freq, 0.5).unwrap();
        let out = bandpass(&ctx, &tone, 500.0, 2_000.0, 3).unwrap();
        assert_eq!(out.len(), tone.len());
        peak_after_transient(&out)
    }

    /// Peak of a 1.5 s tone through the 100-400 Hz default-order band, with
    /// the first half second dropped so the narrow band has settled.
    fn low_band_peak(freq: f64) -> f32 {
        let ctx = SignalCtx::default();
        let tone = sine_wave(&ctx, freq, 1.5).unwrap();
        let out = bandpass(&ctx, &tone, 100.0, 400.0, DEFAULT_FILTER_ORDER).unwrap();
        assert!(
            out.iter().all(|s| s.is_finite()),
            "{freq} Hz produced non-finite output"
        );
        out[22_050..]
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn convolve(x: &[f64], y: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; x.len() + y.len() - 1];
        for (i, &a) in x.iter().enumerate() {
            for (j, &b) in y.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        out
    }

    #[test]
    fn test_poly_expands_roots() {
        // (x - 1)(x + 1) = x^2 - 1
        let c = poly(&[Complex::new(1.0, 0.0), Complex::new(-1.0, 0.0)]);
        assert_eq!(c, [1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_design_shape() {
        let ctx = SignalCtx::default();
        let tf = butter_bandpass(&ctx, 300.0, 3_000.0, 4).unwrap();

        assert_eq!(tf.b.len(), 9);
        assert_eq!(tf.a.len(), 9);
        assert!((tf.a[0] - 1.0).abs() < 1e-12);
        // zeros at z = 1 block DC
        let dc: f64 = tf.b.iter().sum();
        assert!(dc.abs() < 1e-9, "DC gain should be zero, got {dc}");
    }

    #[test]
    fn test_first_order_numerator_is_antisymmetric() {
        let ctx = SignalCtx::default();
        let tf = butter_bandpass(&ctx, 1_000.0, 4_000.0, 1).unwrap();
        assert!(tf.b[1].abs() < 1e-12);
        assert!((tf.b[0] + tf.b[2]).abs() < 1e-12);
    }

    #[test]
    fn test_passes_center_frequency() {
        let peak = filtered_peak(1_000.0);
        assert!(peak > 0.9, "expected passband gain near 1, got {peak}");
    }

    #[test]
    fn test_rejects_below_band() {
        let peak = filtered_peak(60.0);
        assert!(peak < 0.1, "expected 60 Hz to be attenuated, got {peak}");
    }

    #[test]
    fn test_rejects_above_band() {
        let peak = filtered_peak(10_000.0);
        assert!(peak < 0.1, "expected 10 kHz to be attenuated, got {peak}");
    }

    #[test]
    fn test_lfilter_identity() {
        let tf = TransferFunction {
            b: vec![1.0],
            a: vec![1.0],
        };
        assert_eq!(lfilter(&tf, &[0.5, -0.25, 1.0]), [0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_lfilter_one_pole() {
        // y[n] = x[n] + 0.5 y[n-1]
        let tf = TransferFunction {
            b: vec![1.0, 0.0],
            a: vec![1.0, -0.5],
        };
        assert_eq!(lfilter(&tf, &[1.0, 0.0, 0.0]), [1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_matches_reference_coefficients() {
        // rate 2 puts Nyquist at 1 Hz, so the edges are Wn = 0.1 and 0.2
        let ctx = SignalCtx::new(2);
        let tf = butter_bandpass(&ctx, 0.1, 0.2, 2).unwrap();
        let expected = [
            0.0200833655642112,
            0.0,
            -0.0401667311284224,
            0.0,
            0.0200833655642112,
        ];
        for (got, want) in tf.b.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "b = {:?}", tf.b);
        }
    }

    #[test]
    fn test_sections_multiply_out_to_transfer_function() {
        let ctx = SignalCtx::default();
        let tf = butter_bandpass(&ctx, 500.0, 2_000.0, 3).unwrap();
        let sections = butter_bandpass_sos(&ctx, 500.0, 2_000.0, 3).unwrap();
        assert_eq!(sections.len(), 3);

        let (b, a) = sections
            .iter()
            .fold((vec![1.0], vec![1.0]), |(b, a), s| {
                (convolve(&b, &s.b), convolve(&a, &s.a))
            });
        for (got, want) in b.iter().zip(&tf.b) {
            assert!((got - want).abs() < 1e-12);
        }
        for (got, want) in a.iter().zip(&tf.a) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sections_are_stable() {
        let ctx = SignalCtx::default();
        let sections = butter_bandpass_sos(&ctx, 100.0, 400.0, DEFAULT_FILTER_ORDER).unwrap();
        assert_eq!(sections.len(), DEFAULT_FILTER_ORDER);
        // |a2| is the squared pole radius of each pair
        assert!(sections.iter().all(|s| s.a[2].abs() < 1.0));
    }

    #[test]
    fn test_default_order_low_band_passes_center() {
        // center sqrt(100 · 400) = 200 Hz
        let peak = low_band_peak(200.0);
        assert!((peak - 1.0).abs() < 0.02, "expected unity at 200 Hz, got {peak}");
    }

    #[test]
    fn test_default_order_low_band_edges_at_half_power() {
        for edge in [100.0, 400.0] {
            let peak = low_band_peak(edge);
            assert!(
                (peak - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.02,
                "expected -3 dB at {edge} Hz, got {peak}"
            );
        }
    }

    #[test]
    fn test_default_order_low_band_rejects_outside() {
        for freq in [60.0, 1_000.0] {
            let peak = low_band_peak(freq);
            assert!(peak < 0.1, "expected {freq} Hz to be attenuated, got {peak}");
        }
    }

    #[test]
    fn test_sosfilt_does_not_carry_state_between_calls() {
        let ctx = SignalCtx::default();
        let sections = butter_bandpass_sos(&ctx, 500.0, 2_000.0, 2).unwrap();
        let tone = sine_wave(&ctx, 1_000.0, 0.01).unwrap();
        assert_eq!(sosfilt(&sections, &tone), sosfilt(&sections, &tone));
    }

    #[test]
    fn test_biquad_one_pole() {
        // y[n] = x[n] + 0.5 y[n-1]
        let mut section = Biquad::new([1.0, 0.0, 0.0], [1.0, -0.5, 0.0]);
        let out: Vec<f64> = [1.0, 0.0, 0.0].iter().map(|&x| section.process(x)).collect();
        assert_eq!(out, [1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let ctx = SignalCtx::default();
        assert!(butter_bandpass(&ctx, 0.0, 1_000.0, 2).is_err());
        assert!(butter_bandpass(&ctx, 2_000.0, 1_000.0, 2).is_err());
        assert!(butter_bandpass(&ctx, 100.0, 22_050.0, 2).is_err());
        assert!(butter_bandpass(&ctx, 100.0, 1_000.0, 0).is_err());
        assert!(butter_bandpass_sos(&ctx, 100.0, 1_000.0, 0).is_err());
    }
}
