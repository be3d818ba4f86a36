//! Benchmarks for the Viralcast analytics engine
//!
//! Run with: cargo bench --package viralcast-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use viralcast_core::types::{FeatureVector, OscillatorState};
use viralcast_engine::{
    box_counting_dimension, hurst_exponent, BatchExecutor, CompositeScorer, DEFAULT_BOX_SCALES,
};

/// Create a realistic oscillating test series
fn create_series(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 0.05).sin() * 40.0 + (t * 0.013).cos() * 15.0 + ((i * 31) % 17) as f64
        })
        .collect()
}

fn create_feature_vector() -> FeatureVector {
    FeatureVector {
        fractal_series: create_series(256),
        frequencies: vec![256.0, 320.0, 341.3, 426.7],
        amplitudes: vec![0.9, 0.7, 0.8, 0.5],
        oscillator_states: (0..7)
            .map(|i| OscillatorState::new(i as f64 * 0.4, 0.5 + 0.05 * i as f64))
            .collect(),
        emotional_spectrum: vec![0.6, 0.8, 0.4, 0.7],
        hashtag_scores: vec![0.9, 0.8, 0.6, 0.4, 0.3],
        timing_factors: vec![0.7, 0.8],
        engagement_rate: 65.0,
        share_probability: 0.25,
        network_reach: 80.0,
        uniqueness: 0.6,
        ..Default::default()
    }
}

fn bench_fractal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fractal Analysis");
    group.measurement_time(Duration::from_secs(5));

    for &n in &[128usize, 512, 2048] {
        let series = create_series(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("box_counting", n), &series, |b, data| {
            b.iter(|| box_counting_dimension(black_box(data), &DEFAULT_BOX_SCALES).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("hurst", n), &series, |b, data| {
            b.iter(|| hurst_exponent(black_box(data)).unwrap());
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = CompositeScorer::default();
    let freqs: Vec<f64> = (0..16).map(|i| 200.0 + 25.0 * i as f64).collect();
    let amps = vec![0.8; 16];

    c.bench_function("phi_resonance_16", |b| {
        b.iter(|| {
            scorer
                .phi_resonance(black_box(&freqs), black_box(&amps))
                .unwrap()
        });
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Execution");
    group.measurement_time(Duration::from_secs(8));

    for &n in &[16usize, 256, 1024] {
        let rows: Vec<FeatureVector> = (0..n).map(|_| create_feature_vector()).collect();
        let executor = BatchExecutor::default();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("score_batch", n), &rows, |b, rows| {
            b.iter(|| executor.score_batch(black_box(rows)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("virality_batch", n), &rows, |b, rows| {
            b.iter(|| executor.virality_batch(black_box(rows)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fractal, bench_scoring, bench_batch);
criterion_main!(benches);
