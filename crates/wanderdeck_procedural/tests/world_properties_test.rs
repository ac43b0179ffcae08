//! # World Property Tests
//!
//! Determinism, chunk seams and cache behaviour of `WorldGenerator`.

use std::collections::HashSet;

use wanderdeck_procedural::{
    meadow_roll, ChunkCoord, ChunkGenerator, TerrainClassifier, TerrainKind, WorldGenerator,
    WorldSeed, CHUNK_SIZE,
};

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const C: i32 = CHUNK_SIZE as i32;

/// Classifies a tile straight from the noise, bypassing chunks and cache.
fn direct_tile(seed: WorldSeed, x: i32, y: i32) -> TerrainKind {
    let classifier = TerrainClassifier::new(seed);
    let coord = ChunkCoord::from_tile_pos(x, y);
    let (lx, ly) = ChunkCoord::local_offset(x, y);
    TerrainClassifier::classify(classifier.sample(x, y), meadow_roll(seed, coord, lx, ly))
}

/// Test: Same seed, fresh generators, identical tiles.
#[test]
fn test_tile_at_is_deterministic() {
    let seed = WorldSeed::new(1234);
    let world1 = WorldGenerator::new(seed);
    let world2 = WorldGenerator::new(seed);

    for i in -300..300 {
        let x = i * 7;
        let y = i * -13 + 5;

        let first = world1.tile_at(x, y);
        assert_eq!(first, world1.tile_at(x, y), "Cached query changed at ({x}, {y})");
        assert_eq!(first, world2.tile_at(x, y), "Fresh world differs at ({x}, {y})");
    }
}

/// Test: Regenerated chunks are byte-for-byte identical.
#[test]
fn test_regeneration_is_byte_identical() {
    let seed = WorldSeed::new(42);
    let world = WorldGenerator::new(seed);

    for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-7, 3), ChunkCoord::new(100, -100)] {
        let cached = world.generate_chunk(coord);
        let regenerated = ChunkGenerator::new(seed).generate(coord);
        assert_eq!(cached.as_bytes(), regenerated.as_bytes(), "Chunk {coord:?} drifted");
    }
}

/// Test: Tiles on both sides of a chunk seam follow the global noise.
#[test]
fn test_chunk_boundary_continuity() {
    let seed = WorldSeed::new(42);
    let world = WorldGenerator::new(seed);

    for y in -40..40 {
        for x in [C - 1, C, -1, 0, 3 * C - 1, 3 * C] {
            assert_eq!(
                world.tile_at(x, y),
                direct_tile(seed, x, y),
                "Seam mismatch at ({x}, {y})"
            );
        }
    }

    for x in -40..40 {
        for y in [C - 1, C, -C - 1, -C] {
            assert_eq!(world.tile_at(x, y), direct_tile(seed, x, y), "Seam mismatch at ({x}, {y})");
        }
    }
}

/// Test: Seed 42, tiles (0,0) and (16,0) live in chunks (0,0) and (1,0).
#[test]
fn test_end_to_end_seed_42() {
    let world = WorldGenerator::new(WorldSeed::new(42));

    let origin = world.tile_at(0, 0);
    assert!(world.is_cached(ChunkCoord::new(0, 0)));
    assert!(!world.is_cached(ChunkCoord::new(1, 0)));

    let east = world.tile_at(16, 0);
    assert!(world.is_cached(ChunkCoord::new(1, 0)));
    assert_eq!(world.cached_chunk_count(), 2);
    assert_eq!(world.stats().chunks_generated, 2);

    let reborn = WorldGenerator::new(WorldSeed::new(42));
    assert_eq!(reborn.tile_at(0, 0), origin);
    assert_eq!(reborn.tile_at(16, 0), east);
}

/// Test: Different seeds give different worlds.
#[test]
fn test_different_seeds_differ() {
    let a = WorldGenerator::new(WorldSeed::new(1));
    let b = WorldGenerator::new(WorldSeed::new(2));

    let differing = (0..64)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| a.tile_at(x, y) != b.tile_at(x, y))
        .count();

    assert!(differing > 64 * 64 / 10, "Only {differing} tiles differ");
}

/// Test: Many threads querying the same area converge on one chunk per key.
#[test]
fn test_concurrent_queries_converge() {
    let seed = WorldSeed::new(99);
    let world = WorldGenerator::new(seed);

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let world = &world;
            scope.spawn(move || {
                for step in 0..(4 * C) {
                    // Workers walk the same area in different orders.
                    let x = if worker % 2 == 0 { step } else { 4 * C - 1 - step };
                    for y in 0..(2 * C) {
                        let _ = world.tile_at(x, y);
                    }
                }
            });
        }
    });

    assert_eq!(world.cached_chunk_count(), 8);
    let stats = world.stats();
    assert_eq!(stats.chunks_generated, 8);

    for cy in 0..2 {
        for cx in 0..4 {
            let coord = ChunkCoord::new(cx, cy);
            let expected = ChunkGenerator::new(seed).generate(coord);
            assert_eq!(world.generate_chunk(coord).as_bytes(), expected.as_bytes());
        }
    }
}

/// Test: Concurrent prefetches each count only their own inserts.
#[test]
fn test_concurrent_prefetch_counts_are_disjoint() {
    let world = WorldGenerator::new(WorldSeed::new(7));

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let world = &world;
                scope.spawn(move || {
                    // Overlapping squares, plus tile queries racing the prefetch.
                    let inserted = world.prefetch_around(worker * C, 0, 2);
                    for x in 0..(3 * C) {
                        let _ = world.tile_at(x, -C);
                    }
                    inserted
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("worker panicked"))
            .collect()
    });

    let prefetched: usize = counts.iter().sum();
    let stats = world.stats();
    assert!(
        prefetched <= world.cached_chunk_count(),
        "prefetches claimed {prefetched} of {} chunks",
        world.cached_chunk_count()
    );
    assert_eq!(u64::try_from(world.cached_chunk_count()).expect("count"), stats.chunks_generated);
}

/// Test: Prefetches of the same square split the work without double counting.
#[test]
fn test_parallel_prefetch_of_same_area_sums_to_area() {
    let world = WorldGenerator::new(WorldSeed::new(8));

    let total: usize = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let world = &world;
                scope.spawn(move || world.prefetch_around(0, 0, 2))
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("worker panicked"))
            .sum()
    });

    assert_eq!(total, 25);
    assert_eq!(world.cached_chunk_count(), 25);
}

/// Test: The world has variety and enough open ground to walk on.
#[test]
fn test_terrain_variety_and_walkability() {
    let world = WorldGenerator::new(WorldSeed::new(12345));

    let mut kinds = HashSet::new();
    let mut walkable = 0;
    let mut total = 0;

    for y in (-256..256).step_by(2) {
        for x in (-256..256).step_by(2) {
            let kind = world.tile_at(x, y);
            kinds.insert(kind);
            if kind.is_walkable() {
                walkable += 1;
            }
            total += 1;
        }
    }

    let walkable_percentage = f64::from(walkable) / f64::from(total) * 100.0;
    println!("Kinds found: {kinds:?}");
    println!("Walkable terrain: {walkable_percentage:.1}%");

    assert!(kinds.len() >= 5, "Expected varied terrain, found {kinds:?}");
    assert!(kinds.contains(&TerrainKind::Meadow), "Meadows should be scattered in grass");
    assert!(walkable_percentage > 30.0, "Too little walkable ground: {walkable_percentage:.1}%");
}
