//! Benchmarks for waveform generators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use feelwave::{
    dsp::{sine_wave, square_wave},
    SignalCtx,
};

use crate::DURATIONS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = SignalCtx::default();

    for &seconds in DURATIONS {
        group.bench_with_input(BenchmarkId::new("sine", seconds), &seconds, |b, &s| {
            b.iter(|| sine_wave(black_box(&ctx), black_box(60.0), s))
        });

        group.bench_with_input(BenchmarkId::new("square", seconds), &seconds, |b, &s| {
            b.iter(|| square_wave(black_box(&ctx), black_box(1.0), s, black_box(0.5)))
        });
    }

    group.finish();
}
