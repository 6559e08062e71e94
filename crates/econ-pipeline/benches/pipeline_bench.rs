//! Full-pipeline benchmark over growing series lengths
//!
//! Run with: cargo bench -p econ-pipeline --bench pipeline_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use econ_core::Series;
use econ_pipeline::{run_diagnostics, DiagnosticsConfig};
use rand::prelude::*;
use rand_distr::Normal;

/// Daily-like index level driven by a slowly rising CO2 trend
fn generate_pair(size: usize, seed: u64) -> (Series, Series) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 120.0).unwrap();
    let co2: Vec<f64> = (0..size)
        .map(|i| 400.0 + 0.006 * i as f64 + 2.0 * (i as f64 / 58.0).sin())
        .collect();
    let index: Vec<f64> = co2
        .iter()
        .map(|c| 17000.0 + 850.0 * (c - 400.0) + noise.sample(&mut rng))
        .collect();
    (
        Series::new("DJI_Close", index).unwrap(),
        Series::new("CO2_Level", co2).unwrap(),
    )
}

fn bench_run_diagnostics(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_diagnostics");
    let config = DiagnosticsConfig::default();

    for &size in &[250, 1000, 2500, 6000] {
        let (y, x) = generate_pair(size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| run_diagnostics(black_box(&y), black_box(&x), &config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run_diagnostics);
criterion_main!(benches);
