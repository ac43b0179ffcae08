//! # Encounters
//!
//! Decides, one step at a time, whether the player runs into a due card.
//!
//! Rolls come from a seeded ChaCha stream, so a session replays exactly
//! given the same config and the same moves.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wanderdeck_procedural::TerrainKind;

use crate::config::EncounterConfig;

/// Per-step encounter roller with a cooldown.
#[derive(Clone, Debug)]
pub struct EncounterRoller {
    odds: EncounterConfig,
    rng: ChaCha8Rng,
    cooldown_left: u32,
}

impl EncounterRoller {
    /// Creates a roller seeded from `config.rng_seed`.
    #[must_use]
    pub fn new(config: &EncounterConfig) -> Self {
        Self {
            odds: config.clone(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            cooldown_left: 0,
        }
    }

    /// Rolls for one step taken onto `terrain`.
    ///
    /// While cooling down the step only counts down and no randomness is
    /// drawn. A hit starts a new cooldown.
    pub fn roll(&mut self, terrain: TerrainKind) -> bool {
        if self.cooldown_left > 0 {
            self.cooldown_left -= 1;
            return false;
        }

        let hit = self.rng.gen::<f64>() < self.odds.chance_on(terrain);
        if hit {
            self.cooldown_left = self.odds.cooldown_steps;
        }
        hit
    }

    /// Returns whether the next step is guaranteed not to encounter.
    #[must_use]
    pub const fn is_cooling_down(&self) -> bool {
        self.cooldown_left > 0
    }

    /// Steps left before encounters are possible again.
    #[must_use]
    pub const fn cooldown_left(&self) -> u32 {
        self.cooldown_left
    }
}
