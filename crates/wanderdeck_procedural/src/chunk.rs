//! # Chunk System
//!
//! The world is organized into fixed-size square chunks so that it can be
//! generated lazily and without bound in every direction.
//!
//! ## Chunk Format
//!
//! Chunks are 16x16 tiles. Each tile is stored as one byte (the
//! [`TerrainKind`] discriminant), row-major: index `ly * CHUNK_SIZE + lx`.
//!
//! ## Determinism
//!
//! Terrain channels are sampled at global tile coordinates, so a chunk does
//! not know or care which neighbours exist. The meadow roll is a keyed hash
//! of `(seed, chunk, tile index)`: generation order never matters.

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

use crate::noise::WorldSeed;
use crate::terrain::{TerrainClassifier, TerrainKind};

/// Chunk width/height in tiles.
pub const CHUNK_SIZE: usize = 16;

/// Total tiles per chunk.
pub const TILES_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE;

/// `CHUNK_SIZE` as a signed tile distance.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;

/// Purpose tag used to key the meadow hash.
const MEADOW_PURPOSE: u64 = 0x6d65_6164_6f77;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not tiles).
    pub x: i32,
    /// Y coordinate (in chunks, not tiles).
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts world tile coordinates to the containing chunk.
    ///
    /// Uses floor division, so `-1` lands in chunk `-1`, not `0`.
    #[inline]
    #[must_use]
    pub const fn from_tile_pos(tile_x: i32, tile_y: i32) -> Self {
        Self {
            x: tile_x.div_euclid(CHUNK_SIZE_I32),
            y: tile_y.div_euclid(CHUNK_SIZE_I32),
        }
    }

    /// Returns the offset of a world tile inside its chunk.
    ///
    /// Both components are always in `0..CHUNK_SIZE`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn local_offset(tile_x: i32, tile_y: i32) -> (usize, usize) {
        (
            tile_x.rem_euclid(CHUNK_SIZE_I32) as usize,
            tile_y.rem_euclid(CHUNK_SIZE_I32) as usize,
        )
    }

    /// Returns the world X coordinate of the chunk's origin (corner).
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x.wrapping_mul(CHUNK_SIZE_I32)
    }

    /// Returns the world Y coordinate of the chunk's origin.
    #[inline]
    #[must_use]
    pub const fn world_y(self) -> i32 {
        self.y.wrapping_mul(CHUNK_SIZE_I32)
    }
}

/// A chunk of world data.
///
/// Immutable once generated.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk position in the world.
    coord: ChunkCoord,
    /// Tile data, row-major.
    tiles: [TerrainKind; TILES_PER_CHUNK],
}

impl Chunk {
    /// Returns the chunk position.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Gets the tile at local coordinates.
    ///
    /// Out-of-range coordinates return `None`.
    #[inline]
    #[must_use]
    pub fn get(&self, lx: usize, ly: usize) -> Option<TerrainKind> {
        if lx < CHUNK_SIZE && ly < CHUNK_SIZE {
            Some(self.tiles[ly * CHUNK_SIZE + lx])
        } else {
            None
        }
    }

    /// Returns all tiles, row-major.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[TerrainKind] {
        &self.tiles
    }

    /// Returns the tiles as raw bytes (one byte per tile).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tiles[..])
    }

    /// Counts tiles of the given kind.
    #[must_use]
    pub fn count(&self, kind: TerrainKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // One character per tile keeps failing assertions readable.
        writeln!(f, "Chunk({}, {})", self.coord.x, self.coord.y)?;
        for row in self.tiles.chunks(CHUNK_SIZE) {
            let line: String = row
                .iter()
                .map(|t| match t {
                    TerrainKind::Grass => '.',
                    TerrainKind::Water => '~',
                    TerrainKind::Sand => ':',
                    TerrainKind::Rock => '^',
                    TerrainKind::Tree => 'T',
                    TerrainKind::Meadow => '*',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Returns the meadow roll for one tile, uniform in `[0, 1)`.
///
/// A pure function of its inputs: the same tile of the same chunk always
/// rolls the same value, whatever was generated before it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn meadow_roll(seed: WorldSeed, coord: ChunkCoord, lx: usize, ly: usize) -> f64 {
    let mut hasher = SipHasher24::new_with_keys(seed.value(), seed.derive(MEADOW_PURPOSE).value());
    hasher.write_i32(coord.x);
    hasher.write_i32(coord.y);
    hasher.write_u64((ly * CHUNK_SIZE + lx) as u64);

    // Top 53 bits -> exact f64 mantissa.
    (hasher.finish() >> 11) as f64 / (1u64 << 53) as f64
}

/// Chunk generator using procedural noise.
#[derive(Clone, Copy, Debug)]
pub struct ChunkGenerator {
    /// Terrain classifier.
    classifier: TerrainClassifier,
    /// World seed for the meadow roll.
    seed: WorldSeed,
}

impl ChunkGenerator {
    /// Creates a new chunk generator.
    #[must_use]
    pub const fn new(seed: WorldSeed) -> Self {
        Self {
            classifier: TerrainClassifier::new(seed),
            seed,
        }
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Returns the classifier used for every tile.
    #[must_use]
    pub const fn classifier(&self) -> &TerrainClassifier {
        &self.classifier
    }

    /// Generates a chunk at the given coordinates.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut tiles = [TerrainKind::Grass; TILES_PER_CHUNK];

        let world_x = coord.world_x();
        let world_y = coord.world_y();

        for (index, tile) in tiles.iter_mut().enumerate() {
            let lx = index % CHUNK_SIZE;
            let ly = index / CHUNK_SIZE;
            *tile = self.classify_tile(coord, world_x, world_y, lx, ly);
        }

        Chunk { coord, tiles }
    }

    /// Classifies one tile of a chunk.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn classify_tile(
        &self,
        coord: ChunkCoord,
        world_x: i32,
        world_y: i32,
        lx: usize,
        ly: usize,
    ) -> TerrainKind {
        let wx = world_x.wrapping_add(lx as i32);
        let wy = world_y.wrapping_add(ly as i32);

        let sample = self.classifier.sample(wx, wy);
        TerrainClassifier::classify(sample, meadow_roll(self.seed, coord, lx, ly))
    }
}
