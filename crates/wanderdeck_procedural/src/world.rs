//! # World Generator
//!
//! Answers tile queries anywhere in an unbounded world by generating whole
//! chunks on first touch and caching them for the lifetime of the world.
//!
//! ## Cache Rules
//!
//! - Append-only: chunks are never evicted or replaced.
//! - Write-once: if two threads generate the same chunk at the same time,
//!   the first insert wins and the second result is dropped. Both callers
//!   observe the cached value.
//! - Generation runs outside the lock; the write lock is held only for the
//!   insert.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::chunk::{Chunk, ChunkCoord, ChunkGenerator};
use crate::noise::WorldSeed;
use crate::terrain::TerrainKind;

/// Counters for the chunk cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks generated and inserted into the cache.
    pub chunks_generated: u64,
    /// Lookups answered from the cache.
    pub cache_hits: u64,
    /// Generations discarded because another caller inserted first.
    pub lost_races: u64,
}

#[derive(Debug, Default)]
struct AtomicStats {
    chunks_generated: AtomicU64,
    cache_hits: AtomicU64,
    lost_races: AtomicU64,
}

/// Infinite, lazily generated tile world.
///
/// # Example
///
/// ```rust
/// use wanderdeck_procedural::{ChunkCoord, WorldGenerator, WorldSeed};
///
/// let world = WorldGenerator::new(WorldSeed::new(42));
/// let tile = world.tile_at(-3, 100);
///
/// assert!(world.is_cached(ChunkCoord::from_tile_pos(-3, 100)));
/// assert_eq!(WorldGenerator::new(WorldSeed::new(42)).tile_at(-3, 100), tile);
/// ```
#[derive(Debug)]
pub struct WorldGenerator {
    generator: ChunkGenerator,
    chunks: RwLock<HashMap<ChunkCoord, Arc<Chunk>>>,
    stats: AtomicStats,
}

impl WorldGenerator {
    /// Creates an empty world for the given seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            generator: ChunkGenerator::new(seed),
            chunks: RwLock::new(HashMap::new()),
            stats: AtomicStats::default(),
        }
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.generator.seed()
    }

    /// Returns the underlying chunk generator.
    #[must_use]
    pub const fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Classifies the tile at world coordinates, generating its chunk if
    /// needed.
    #[must_use]
    pub fn tile_at(&self, x: i32, y: i32) -> TerrainKind {
        let chunk = self.generate_chunk(ChunkCoord::from_tile_pos(x, y));
        let (lx, ly) = ChunkCoord::local_offset(x, y);

        // local_offset is always in range.
        chunk.get(lx, ly).unwrap_or_default()
    }

    /// Returns the chunk at `coord`, generating and caching it on first use.
    ///
    /// Idempotent: every call for the same coordinate returns the same
    /// cached chunk.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Arc<Chunk> {
        self.fetch(coord).0
    }

    /// Ensures every chunk within `radius` chunks of the chunk containing
    /// tile `(x, y)` is cached.
    ///
    /// # Returns
    ///
    /// Number of chunks this call inserted. Chunks generated meanwhile by
    /// other callers are not counted.
    pub fn prefetch_around(&self, x: i32, y: i32, radius: u32) -> usize {
        let center = ChunkCoord::from_tile_pos(x, y);
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);

        let mut inserted = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let coord = ChunkCoord::new(center.x.saturating_add(dx), center.y.saturating_add(dy));
                if !self.is_cached(coord) && self.fetch(coord).1 {
                    inserted += 1;
                }
            }
        }

        if inserted > 0 {
            tracing::debug!(
                cx = center.x,
                cy = center.y,
                radius,
                inserted,
                cached = self.cached_chunk_count(),
                "prefetched chunks"
            );
        }

        inserted
    }

    /// Looks up or generates `coord`. The flag is true only if this call
    /// inserted the chunk.
    fn fetch(&self, coord: ChunkCoord) -> (Arc<Chunk>, bool) {
        if let Some(chunk) = self.chunks.read().get(&coord) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            return (Arc::clone(chunk), false);
        }

        let generated = Arc::new(self.generator.generate(coord));

        match self.chunks.write().entry(coord) {
            Entry::Occupied(existing) => {
                self.stats.lost_races.fetch_add(1, Ordering::Relaxed);
                (Arc::clone(existing.get()), false)
            }
            Entry::Vacant(slot) => {
                self.stats.chunks_generated.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(cx = coord.x, cy = coord.y, "generated chunk");
                (Arc::clone(slot.insert(generated)), true)
            }
        }
    }

    /// Returns whether the chunk at `coord` has been generated.
    #[must_use]
    pub fn is_cached(&self, coord: ChunkCoord) -> bool {
        self.chunks.read().contains_key(&coord)
    }

    /// Returns the number of cached chunks.
    #[must_use]
    pub fn cached_chunk_count(&self) -> usize {
        self.chunks.read().len()
    }

    /// Returns a snapshot of the cache counters.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            chunks_generated: self.stats.chunks_generated.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
            lost_races: self.stats.lost_races.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_query_populates_cache() {
        let world = WorldGenerator::new(WorldSeed::new(42));
        assert_eq!(world.cached_chunk_count(), 0);

        let _ = world.tile_at(5, 5);
        let _ = world.tile_at(6, 7);

        assert_eq!(world.cached_chunk_count(), 1);
        assert!(world.is_cached(ChunkCoord::new(0, 0)));

        let stats = world.stats();
        assert_eq!(stats.chunks_generated, 1);
        assert_eq!(stats.cache_hits, 1);
    }

    #[test]
    fn test_cached_chunk_is_returned_unchanged() {
        let world = WorldGenerator::new(WorldSeed::new(3));
        let first = world.generate_chunk(ChunkCoord::new(-1, 2));
        let second = world.generate_chunk(ChunkCoord::new(-1, 2));

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_negative_tiles_map_into_negative_chunks() {
        let world = WorldGenerator::new(WorldSeed::new(42));
        let tile = world.tile_at(-1, -1);

        let chunk = world.generate_chunk(ChunkCoord::new(-1, -1));
        assert_eq!(chunk.get(15, 15), Some(tile));
        assert_eq!(world.cached_chunk_count(), 1);
    }

    #[test]
    fn test_prefetch_counts_only_new_chunks() {
        let world = WorldGenerator::new(WorldSeed::new(42));

        assert_eq!(world.prefetch_around(0, 0, 1), 9);
        assert_eq!(world.prefetch_around(0, 0, 1), 0);
        // Shifting one chunk east adds one new column of three.
        assert_eq!(world.prefetch_around(16, 0, 1), 3);
        assert_eq!(world.cached_chunk_count(), 12);
    }

    #[test]
    fn test_prefetch_radius_zero_is_single_chunk() {
        let world = WorldGenerator::new(WorldSeed::new(42));
        assert_eq!(world.prefetch_around(-20, 40, 0), 1);
        assert!(world.is_cached(ChunkCoord::new(-2, 2)));
    }
}
