//! # WANDERDECK Procedural Generation
//!
//! Deterministic tile world for infinite, reproducible exploration.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same world
//! 2. **Chunked**: World is generated in fixed-size 16x16 chunks
//! 3. **Lazy**: A chunk is generated the first time any of its tiles is queried
//! 4. **Order-free**: No shared random stream; generation order never matters
//!
//! ## Core Components
//!
//! - `HashNoise`: Two-octave hash-based value noise
//! - `TerrainClassifier`: Maps elevation/moisture/river channels to a `TerrainKind`
//! - `ChunkGenerator`: Produces whole chunks
//! - `WorldGenerator`: Write-once chunk cache answering `tile_at` queries
//!
//! ## Example
//!
//! ```rust
//! use wanderdeck_procedural::{TerrainKind, WorldGenerator, WorldSeed};
//!
//! let world = WorldGenerator::new(WorldSeed::new(42));
//!
//! let here = world.tile_at(0, 0);
//! let can_stand = here.is_walkable();
//! assert_eq!(can_stand, matches!(here, TerrainKind::Grass | TerrainKind::Sand | TerrainKind::Meadow));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod noise;
pub mod terrain;
pub mod world;

pub use chunk::{meadow_roll, Chunk, ChunkCoord, ChunkGenerator, CHUNK_SIZE, TILES_PER_CHUNK};
pub use noise::{HashNoise, WorldSeed};
pub use terrain::{TerrainClassifier, TerrainKind, TerrainSample};
pub use world::{WorldGenerator, WorldStats};
