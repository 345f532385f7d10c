//! Benchmarks for track combination.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use feelwave::{
    dsp::{combine, sine_wave, square_wave, CombineMode},
    SignalCtx,
};

use crate::DURATIONS;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");
    let ctx = SignalCtx::default();

    for &seconds in DURATIONS {
        let tracks = [
            sine_wave(&ctx, 60.0, seconds).unwrap(),
            square_wave(&ctx, 1.0, seconds, 0.5).unwrap(),
            sine_wave(&ctx, 1.0, seconds).unwrap(),
        ];

        group.bench_with_input(BenchmarkId::new("multiply", seconds), &seconds, |b, _| {
            b.iter(|| combine(black_box(&tracks), CombineMode::Multiply))
        });

        group.bench_with_input(BenchmarkId::new("add", seconds), &seconds, |b, _| {
            b.iter(|| combine(black_box(&tracks), CombineMode::Add))
        });
    }

    group.finish();
}
