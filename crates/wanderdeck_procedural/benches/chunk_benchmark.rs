//! Benchmark for chunk generation and cached tile queries.
//!
//! Run with: cargo bench --package wanderdeck_procedural --bench chunk_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wanderdeck_procedural::chunk::{ChunkCoord, ChunkGenerator};
use wanderdeck_procedural::noise::WorldSeed;
use wanderdeck_procedural::world::WorldGenerator;

fn benchmark_single_chunk(c: &mut Criterion) {
    let gen = ChunkGenerator::new(WorldSeed::new(42));

    c.bench_function("single_chunk_generation", |b| {
        let mut coord = 0i32;
        b.iter(|| {
            coord = coord.wrapping_add(1);
            black_box(gen.generate(ChunkCoord::new(coord, coord / 2)))
        });
    });
}

fn benchmark_chunk_grid(c: &mut Criterion) {
    let gen = ChunkGenerator::new(WorldSeed::new(42));

    let mut group = c.benchmark_group("chunk_grid");

    // 32x32 chunks = 512x512 tiles
    group.throughput(Throughput::Elements(32 * 32));
    group.bench_function("32x32_chunks", |b| {
        b.iter(|| {
            for y in 0..32 {
                for x in 0..32 {
                    black_box(gen.generate(ChunkCoord::new(x, y)));
                }
            }
        });
    });

    group.finish();
}

fn benchmark_cached_tile_queries(c: &mut Criterion) {
    let world = WorldGenerator::new(WorldSeed::new(42));
    let _ = world.prefetch_around(0, 0, 3);

    c.bench_function("cached_tile_at", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = (i + 1) % 96;
            black_box(world.tile_at(black_box(i - 48), black_box(48 - i)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_chunk,
    benchmark_chunk_grid,
    benchmark_cached_tile_queries
);
criterion_main!(benches);
