//! Benchmark for noise generation performance.
//!
//! TARGET: 1,000,000 samples per second
//!
//! Run with: cargo bench --package wanderdeck_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wanderdeck_procedural::noise::{HashNoise, WorldSeed};
use wanderdeck_procedural::terrain::TerrainClassifier;

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = HashNoise::new(WorldSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7), 0))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = HashNoise::new(WorldSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = f64::from(i % 1000) * 0.1;
                let y = f64::from(i / 1000) * 0.1;
                black_box(noise.sample(x, y, 0));
            }
        });
    });

    group.finish();
}

fn benchmark_terrain_sample(c: &mut Criterion) {
    let classifier = TerrainClassifier::new(WorldSeed::new(42));

    c.bench_function("terrain_sample_3_channels", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(classifier.sample(black_box(x), black_box(x / 3)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_terrain_sample
);
criterion_main!(benches);
