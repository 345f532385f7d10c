//! Benchmarks for gain and peak normalization.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use feelwave::{
    dsp::{scale_volume, set_volume, sine_wave},
    SignalCtx,
};

use crate::DURATIONS;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");
    let ctx = SignalCtx::default();

    for &seconds in DURATIONS {
        let signal = sine_wave(&ctx, 60.0, seconds).unwrap();

        group.bench_with_input(BenchmarkId::new("scale_volume", seconds), &seconds, |b, _| {
            b.iter(|| scale_volume(black_box(&signal), black_box(0.5)))
        });

        group.bench_with_input(BenchmarkId::new("set_volume", seconds), &seconds, |b, _| {
            b.iter(|| set_volume(black_box(&signal), black_box(0.25)))
        });
    }

    group.finish();
}
