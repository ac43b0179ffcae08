//! # Terrain Classification
//!
//! Turns three noise channels into a tile kind.
//!
//! Every tile reads:
//! - Elevation (low ground floods, high ground is rock)
//! - Moisture (wet ground grows trees)
//! - River (a thin band of the river channel carves water with sandy banks)
//!
//! The rules are evaluated top to bottom, first match wins. See
//! [`TerrainClassifier::classify`].

use bytemuck::NoUninit;

use crate::noise::{HashNoise, WorldSeed};

/// Tile classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit)]
#[repr(u8)]
pub enum TerrainKind {
    /// Open grass (the fallback kind).
    #[default]
    Grass = 0,
    /// Lakes, seas and rivers.
    Water = 1,
    /// Beaches and river banks.
    Sand = 2,
    /// High ground.
    Rock = 3,
    /// Forest on moist ground.
    Tree = 4,
    /// Flower meadow scattered through grassland.
    Meadow = 5,
}

impl TerrainKind {
    /// All kinds, in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::Grass,
        Self::Water,
        Self::Sand,
        Self::Rock,
        Self::Tree,
        Self::Meadow,
    ];

    /// Returns whether a walker may stand on this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Grass | Self::Sand | Self::Meadow)
    }

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Water => "water",
            Self::Sand => "sand",
            Self::Rock => "rock",
            Self::Tree => "tree",
            Self::Meadow => "meadow",
        }
    }

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Grass),
            1 => Some(Self::Water),
            2 => Some(Self::Sand),
            3 => Some(Self::Rock),
            4 => Some(Self::Tree),
            5 => Some(Self::Meadow),
            _ => None,
        }
    }
}

impl std::fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Raw noise channels for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    /// Elevation in `[0, 1]`.
    pub elevation: f64,
    /// Moisture in `[0, 1]`.
    pub moisture: f64,
    /// River channel in `[0, 1]`.
    pub river: f64,
}

/// Classifies world tiles from noise.
#[derive(Clone, Copy, Debug)]
pub struct TerrainClassifier {
    noise: HashNoise,
}

impl TerrainClassifier {
    /// Tiles per noise unit. Larger = broader features.
    pub const SCALE: f64 = 50.0;
    /// Channel offset of the moisture field.
    pub const OFFSET_MOISTURE: i32 = 1000;
    /// Channel offset of the river field.
    pub const OFFSET_RIVER: i32 = 5000;
    /// Share of otherwise-grass tiles that become meadow.
    pub const MEADOW_CHANCE: f64 = 0.1;

    /// Creates a classifier for the given world seed.
    #[must_use]
    pub const fn new(seed: WorldSeed) -> Self {
        Self {
            noise: HashNoise::new(seed),
        }
    }

    /// Samples all three channels at a global tile coordinate.
    #[must_use]
    pub fn sample(&self, wx: i32, wy: i32) -> TerrainSample {
        let nx = f64::from(wx) / Self::SCALE;
        let ny = f64::from(wy) / Self::SCALE;

        TerrainSample {
            elevation: self.noise.sample(nx, ny, 0),
            moisture: self.noise.sample(nx, ny, Self::OFFSET_MOISTURE),
            river: self.noise.sample(nx * 2.0, ny * 2.0, Self::OFFSET_RIVER),
        }
    }

    /// Classifies a tile.
    ///
    /// `meadow_roll` is a uniform value in `[0, 1)` owned by the tile; it is
    /// only consulted once every other rule has declined.
    #[must_use]
    pub fn classify(sample: TerrainSample, meadow_roll: f64) -> TerrainKind {
        let TerrainSample {
            elevation,
            moisture,
            river,
        } = sample;

        if river > 0.65 && river < 0.67 {
            TerrainKind::Water
        } else if river > 0.63 && river < 0.70 {
            TerrainKind::Sand
        } else if elevation < 0.20 {
            TerrainKind::Water
        } else if elevation < 0.25 {
            TerrainKind::Sand
        } else if elevation > 0.80 {
            TerrainKind::Rock
        } else if moisture > 0.60 {
            TerrainKind::Tree
        } else if meadow_roll < Self::MEADOW_CHANCE {
            TerrainKind::Meadow
        } else {
            TerrainKind::Grass
        }
    }
}
