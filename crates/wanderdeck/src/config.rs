//! # Game Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) is a valid configuration.
//!
//! ```toml
//! [world]
//! seed = 42
//! prefetch_radius = 3
//!
//! [review]
//! progress_path = "srs_progress.json"
//! in_memory = false
//!
//! [encounter]
//! base_chance = 0.005
//! water_chance = 0.001
//! cooldown_steps = 300
//! rng_seed = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wanderdeck_procedural::{TerrainKind, WorldSeed};
use wanderdeck_review::{JsonFileStore, MemoryStore, ProgressStore};

use crate::error::{SessionError, SessionResult};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Terrain settings.
    pub world: WorldConfig,
    /// Review persistence settings.
    pub review: ReviewConfig,
    /// Encounter odds.
    pub encounter: EncounterConfig,
}

impl GameConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] on malformed TOML, unknown keys or
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> SessionResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| SessionError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the file cannot be read or is
    /// invalid.
    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|err| SessionError::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] naming the first bad field.
    pub fn validate(&self) -> SessionResult<()> {
        self.world.validate()?;
        self.encounter.validate()
    }
}

/// Terrain settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// World seed. Same seed, same world.
    pub seed: u64,
    /// Chunks kept generated around the player, in every direction.
    pub prefetch_radius: u32,
}

impl WorldConfig {
    /// Largest accepted prefetch radius. A radius `r` keeps `(2r + 1)²`
    /// chunks generated, and the cache never shrinks.
    pub const MAX_PREFETCH_RADIUS: u32 = 16;

    /// Returns the seed as a [`WorldSeed`].
    #[must_use]
    pub const fn world_seed(&self) -> WorldSeed {
        WorldSeed::new(self.seed)
    }

    fn validate(&self) -> SessionResult<()> {
        if self.prefetch_radius > Self::MAX_PREFETCH_RADIUS {
            return Err(SessionError::Config(format!(
                "world.prefetch_radius must be at most {}, got {}",
                Self::MAX_PREFETCH_RADIUS,
                self.prefetch_radius
            )));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            prefetch_radius: 3,
        }
    }
}

/// Review persistence settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    /// Progress file location.
    pub progress_path: PathBuf,
    /// Keep progress in memory only; nothing is written to disk.
    pub in_memory: bool,
}

impl ReviewConfig {
    /// Builds the store this configuration asks for.
    #[must_use]
    pub fn open_store(&self) -> Box<dyn ProgressStore + Send> {
        if self.in_memory {
            Box::new(MemoryStore::new())
        } else {
            Box::new(JsonFileStore::new(&self.progress_path))
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            progress_path: PathBuf::from(JsonFileStore::DEFAULT_FILE_NAME),
            in_memory: false,
        }
    }
}

/// Encounter odds, rolled once per step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncounterConfig {
    /// Chance per step on land.
    pub base_chance: f64,
    /// Chance per step on water.
    pub water_chance: f64,
    /// Steps after an encounter during which no encounter can occur.
    /// 300 steps is five seconds of movement at 60 steps per second.
    pub cooldown_steps: u32,
    /// Seed of the encounter RNG.
    pub rng_seed: u64,
}

impl EncounterConfig {
    /// Returns the per-step encounter chance on `terrain`.
    #[must_use]
    pub fn chance_on(&self, terrain: TerrainKind) -> f64 {
        match terrain {
            TerrainKind::Water => self.water_chance,
            _ => self.base_chance,
        }
    }

    fn validate(&self) -> SessionResult<()> {
        for (name, value) in [
            ("encounter.base_chance", self.base_chance),
            ("encounter.water_chance", self.water_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SessionError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            base_chance: 0.005,
            water_chance: 0.001,
            cooldown_steps: 300,
            rng_seed: 0,
        }
    }
}
