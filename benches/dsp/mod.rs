//! Benchmarks for sequence-level DSP functions.

mod amplify;
mod filter;
mod mix;
mod oscillator;

pub use amplify::bench_amplify;
pub use filter::bench_filter;
pub use mix::bench_mix;
pub use oscillator::bench_oscillator;
