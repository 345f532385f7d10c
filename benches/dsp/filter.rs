//! Benchmarks for Butterworth bandpass design and filtering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use feelwave::{
    dsp::{butter_bandpass, butter_bandpass_sos, lfilter, sine_wave, sosfilt},
    SignalCtx,
};

use crate::DURATIONS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = SignalCtx::default();

    for order in [2usize, 5] {
        group.bench_with_input(BenchmarkId::new("design", order), &order, |b, &order| {
            b.iter(|| butter_bandpass(black_box(&ctx), 200.0, 2_000.0, order))
        });
    }

    let tf = butter_bandpass(&ctx, 200.0, 2_000.0, 5).unwrap();
    let sections = butter_bandpass_sos(&ctx, 200.0, 2_000.0, 5).unwrap();
    for &seconds in DURATIONS {
        let signal = sine_wave(&ctx, 440.0, seconds).unwrap();

        group.bench_with_input(BenchmarkId::new("lfilter", seconds), &seconds, |b, _| {
            b.iter(|| lfilter(black_box(&tf), black_box(&signal)))
        });
        group.bench_with_input(BenchmarkId::new("sosfilt", seconds), &seconds, |b, _| {
            b.iter(|| sosfilt(black_box(&sections), black_box(&signal)))
        });
    }

    group.finish();
}
