//! # Exploration Session
//!
//! The only place the world and the scheduler meet.
//!
//! ## Flow
//!
//! ```text
//! step(dx, dy) ──▶ tile_at(target) ──▶ walkable? ──▶ roll on tile_at(x, y - 1)
//!                                                        │ hit
//!                                                        ▼
//!                        answer(quality) ◀── review open (steps return InReview)
//! ```
//!
//! Due cards are queued in deck order when the session starts and again on
//! every [`Session::reload`]. Each encounter takes the front of the queue.
//!
//! Walkability is decided by the tile under the player's feet. The
//! encounter roll uses the tile the top of the player's sprite overlaps,
//! which is the one to the north. That is how a player walking along a
//! shore can meet a card "in" the water without ever standing on it.

use std::collections::VecDeque;

use wanderdeck_procedural::{ChunkCoord, TerrainKind, WorldGenerator};
use wanderdeck_review::{
    Clock, ItemId, ProgressStore, ReviewError, ReviewItem, ReviewScheduler, ReviewState,
};

use crate::config::GameConfig;
use crate::encounter::EncounterRoller;
use crate::error::{SessionError, SessionResult};

/// Result of one attempted step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// A review is open; movement is frozen until it is answered.
    InReview,
    /// The target tile cannot be walked on. The player did not move.
    Blocked {
        /// Terrain that blocked the move.
        terrain: TerrainKind,
    },
    /// The player moved.
    Moved {
        /// Terrain under the player.
        terrain: TerrainKind,
    },
    /// The player moved and ran into a due card. The review is now open.
    Encounter {
        /// Terrain under the player.
        terrain: TerrainKind,
        /// The card to review.
        item: ReviewItem,
    },
}

/// Running totals for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Successful moves.
    pub steps: u64,
    /// Moves refused by terrain.
    pub blocked: u64,
    /// Encounters started.
    pub encounters: u64,
    /// Reviews recorded (including ones whose save failed).
    pub reviews: u64,
    /// Recorded reviews graded below passing.
    pub lapses: u64,
}

/// One player exploring one world with one deck.
#[derive(Debug)]
pub struct Session<S: ProgressStore, C: Clock> {
    world: WorldGenerator,
    scheduler: ReviewScheduler<S, C>,
    deck: Vec<ReviewItem>,
    queue: VecDeque<ReviewItem>,
    active: Option<ReviewItem>,
    encounters: EncounterRoller,
    position: (i32, i32),
    prefetch_radius: u32,
    stats: SessionStats,
}

impl<S: ProgressStore, C: Clock> Session<S, C> {
    /// Tile the player starts on.
    pub const START: (i32, i32) = (8, 8);

    /// Starts a session.
    ///
    /// Opens the scheduler over `store`, gives every deck card a review
    /// state, queues the cards that are due and generates the chunks
    /// around the start tile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `config` fails validation.
    pub fn new(config: &GameConfig, deck: Vec<ReviewItem>, store: S, clock: C) -> SessionResult<Self> {
        config.validate()?;

        let world = WorldGenerator::new(config.world.world_seed());
        let mut scheduler = ReviewScheduler::open(store, clock);
        let registered = scheduler.register_items(&deck);
        let queue: VecDeque<ReviewItem> = scheduler.due_now(&deck).into_iter().cloned().collect();

        let (x, y) = Self::START;
        world.prefetch_around(x, y, config.world.prefetch_radius);

        tracing::info!(
            seed = config.world.seed,
            cards = deck.len(),
            new_cards = registered,
            due = queue.len(),
            "session started"
        );

        Ok(Self {
            world,
            scheduler,
            deck,
            queue,
            active: None,
            encounters: EncounterRoller::new(&config.encounter),
            position: Self::START,
            prefetch_radius: config.world.prefetch_radius,
            stats: SessionStats::default(),
        })
    }

    /// Attempts to move by `(dx, dy)` tiles.
    ///
    /// The returned terrain is always the one under the player's feet. The
    /// encounter chance comes from the terrain one tile north of the new
    /// position.
    pub fn step(&mut self, dx: i32, dy: i32) -> StepOutcome {
        if self.active.is_some() {
            return StepOutcome::InReview;
        }

        let (x, y) = self.position;
        let target = (x.saturating_add(dx), y.saturating_add(dy));
        let terrain = self.world.tile_at(target.0, target.1);

        if !terrain.is_walkable() {
            self.stats.blocked += 1;
            return StepOutcome::Blocked { terrain };
        }

        let entered_new_chunk =
            ChunkCoord::from_tile_pos(x, y) != ChunkCoord::from_tile_pos(target.0, target.1);
        self.position = target;
        self.stats.steps += 1;
        if entered_new_chunk {
            self.world.prefetch_around(target.0, target.1, self.prefetch_radius);
        }

        let overlapped = self.world.tile_at(target.0, target.1.saturating_sub(1));
        if self.queue.is_empty() || !self.encounters.roll(overlapped) {
            return StepOutcome::Moved { terrain };
        }

        match self.queue.pop_front() {
            Some(item) => {
                self.stats.encounters += 1;
                tracing::info!(
                    item = %item.id(),
                    x = target.0,
                    y = target.1,
                    %terrain,
                    %overlapped,
                    remaining = self.queue.len(),
                    "encounter"
                );
                self.active = Some(item.clone());
                StepOutcome::Encounter { terrain, item }
            }
            None => StepOutcome::Moved { terrain },
        }
    }

    /// Grades the open review.
    ///
    /// An invalid grade leaves the review open so the player can answer
    /// again. Any other outcome closes it.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveReview`] if no review is open.
    /// - [`SessionError::Review`] with the scheduler's error. On
    ///   `PersistFailure` the review has still been recorded in memory.
    pub fn answer(&mut self, quality: i64) -> SessionResult<ReviewState> {
        let item_id = match &self.active {
            Some(item) => item.id().clone(),
            None => return Err(SessionError::NoActiveReview),
        };

        let result = self.scheduler.process_review(&item_id, quality);
        if matches!(result, Err(ReviewError::InvalidGrade(_))) {
            return result.map_err(SessionError::from);
        }

        self.active = None;
        self.stats.reviews += 1;
        if quality < 3 {
            self.stats.lapses += 1;
        }
        result.map_err(SessionError::from)
    }

    /// Reloads review progress from the store and rebuilds the due queue.
    ///
    /// Deck cards missing from the store get a fresh state again. The queue
    /// is refilled in deck order with every card due now, except the one
    /// under review, which stays open.
    ///
    /// # Returns
    ///
    /// Number of cards queued.
    pub fn reload(&mut self) -> usize {
        let loaded = self.scheduler.reload();
        self.scheduler.register_items(&self.deck);

        let active_id = self.active.as_ref().map(ReviewItem::id);
        self.queue = self
            .scheduler
            .due_now(&self.deck)
            .into_iter()
            .filter(|item| Some(item.id()) != active_id)
            .cloned()
            .collect();

        tracing::info!(
            items = loaded,
            due = self.queue.len(),
            reviewing = active_id.is_some(),
            "review progress reloaded"
        );
        self.queue.len()
    }

    /// Writes review progress now.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Review`] if the save failed.
    pub fn save(&self) -> SessionResult<()> {
        self.scheduler.save()?;
        tracing::info!(items = self.scheduler.len(), "review progress saved");
        Ok(())
    }

    /// Returns the review state the review screen shows for `item_id`.
    #[must_use]
    pub fn card_stats(&self, item_id: &ItemId) -> ReviewState {
        self.scheduler.stats(item_id)
    }

    /// Returns the card currently under review.
    #[must_use]
    pub fn active_review(&self) -> Option<&ReviewItem> {
        self.active.as_ref()
    }

    /// Number of due cards still waiting for an encounter.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Returns the player's tile position.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Returns the terrain under the player.
    #[must_use]
    pub fn terrain_here(&self) -> TerrainKind {
        self.world.tile_at(self.position.0, self.position.1)
    }

    /// Returns the session totals.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Returns the world.
    #[must_use]
    pub const fn world(&self) -> &WorldGenerator {
        &self.world
    }

    /// Returns the scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &ReviewScheduler<S, C> {
        &self.scheduler
    }

    /// Returns the deck.
    #[must_use]
    pub fn deck(&self) -> &[ReviewItem] {
        &self.deck
    }
}
