//! # Review Scheduler
//!
//! Owns the state map for one learner and decides what is due.
//!
//! The scheduler is not internally synchronized. A session owns it and
//! serializes calls; two reviews of the same item must never race.

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::ReviewResult;
use crate::grade::Grade;
use crate::item::{ItemId, Reviewable};
use crate::state::ReviewState;
use crate::store::{JsonFileStore, ProgressStore, StateMap};

/// SM-2 scheduler over a persisted state map.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use wanderdeck_review::{ItemId, ManualClock, MemoryStore, ReviewScheduler};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
/// let mut scheduler = ReviewScheduler::open(MemoryStore::new(), ManualClock::new(start));
/// let card = ItemId::from("chat");
///
/// let state = scheduler.process_review(&card, 5).unwrap();
/// assert_eq!(state.interval, 1);
/// assert_eq!(state.due_at, start + Duration::days(1));
/// assert!(scheduler.due_items(&[card], start).is_empty());
/// ```
#[derive(Debug)]
pub struct ReviewScheduler<S = JsonFileStore, C = SystemClock> {
    states: StateMap,
    store: S,
    clock: C,
}

impl<S: ProgressStore, C: Clock> ReviewScheduler<S, C> {
    /// Opens a scheduler over whatever `store` holds.
    ///
    /// A store that cannot be read is treated as having no history: the
    /// scheduler starts empty and a warning is logged.
    pub fn open(store: S, clock: C) -> Self {
        let states = load_states(&store);
        Self {
            states,
            store,
            clock,
        }
    }

    /// Replaces the in-memory map with what the store holds now.
    ///
    /// Unsaved changes, such as states created by
    /// [`Self::register_items`], are discarded. A store that cannot be read
    /// leaves the scheduler empty, as in [`Self::open`].
    ///
    /// # Returns
    ///
    /// Number of states loaded.
    pub fn reload(&mut self) -> usize {
        self.states = load_states(&self.store);
        self.states.len()
    }

    /// Creates default state for every item that has none.
    ///
    /// # Returns
    ///
    /// Number of states created. Nothing is persisted.
    pub fn register_items<T: Reviewable>(&mut self, items: &[T]) -> usize {
        let now = self.clock.now();
        let before = self.states.len();
        for item in items {
            self.states
                .entry(item.item_id().clone())
                .or_insert_with(|| ReviewState::new(now));
        }
        self.states.len() - before
    }

    /// Returns the state for `item_id`, creating the default one if needed.
    pub fn get_or_init(&mut self, item_id: &ItemId) -> &ReviewState {
        let now = self.clock.now();
        self.states
            .entry(item_id.clone())
            .or_insert_with(|| ReviewState::new(now))
    }

    /// Returns the stored state for `item_id`, if any.
    #[must_use]
    pub fn state(&self, item_id: &ItemId) -> Option<&ReviewState> {
        self.states.get(item_id)
    }

    /// Returns the state a review screen should show for `item_id`: the
    /// stored one, or the default at the current time. Never inserts.
    #[must_use]
    pub fn stats(&self, item_id: &ItemId) -> ReviewState {
        self.states
            .get(item_id)
            .cloned()
            .unwrap_or_else(|| ReviewState::new(self.clock.now()))
    }

    /// Returns the items due at `now`, in input order.
    ///
    /// Items with no state are due.
    pub fn due_items<'a, T: Reviewable>(&self, items: &'a [T], now: DateTime<Utc>) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| match self.states.get(item.item_id()) {
                Some(state) => state.is_due(now),
                None => true,
            })
            .collect()
    }

    /// [`Self::due_items`] at the clock's current time.
    pub fn due_now<'a, T: Reviewable>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.due_items(items, self.clock.now())
    }

    /// Grades a review of `item_id` and persists the whole map.
    ///
    /// # Errors
    ///
    /// - [`crate::ReviewError::InvalidGrade`] if `quality` is outside
    ///   `0..=5`. Nothing changes and nothing is written.
    /// - [`crate::ReviewError::PersistFailure`] if the save failed. The
    ///   review is still applied in memory.
    pub fn process_review(&mut self, item_id: &ItemId, quality: i64) -> ReviewResult<ReviewState> {
        let grade = Grade::new(quality)?;
        self.process_grade(item_id, grade)
    }

    /// Same as [`Self::process_review`] with an already validated grade.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReviewError::PersistFailure`] if the save failed.
    pub fn process_grade(&mut self, item_id: &ItemId, grade: Grade) -> ReviewResult<ReviewState> {
        let now = self.clock.now();
        let state = self
            .states
            .entry(item_id.clone())
            .or_insert_with(|| ReviewState::new(now));
        state.apply(grade, now);
        let updated = state.clone();

        tracing::debug!(
            item = %item_id,
            grade = grade.value(),
            interval = updated.interval,
            ease = updated.ease,
            lapses = updated.lapses,
            "processed review"
        );

        self.save()?;
        Ok(updated)
    }

    /// Writes the whole map to the store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReviewError::PersistFailure`] if the write failed.
    pub fn save(&self) -> ReviewResult<()> {
        self.store.save(&self.states).map_err(|err| {
            tracing::warn!(error = %err, "review progress not persisted");
            err
        })
    }

    /// Returns the number of items with state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns whether no item has state yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns every stored state, ordered by identifier.
    #[must_use]
    pub fn states(&self) -> &StateMap {
        &self.states
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the scheduler's clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn load_states<S: ProgressStore>(store: &S) -> StateMap {
    match store.load() {
        Ok(mut states) => {
            states.values_mut().for_each(ReviewState::normalize);
            tracing::info!(items = states.len(), "loaded review progress");
            states
        }
        Err(err) => {
            tracing::warn!(error = %err, "review progress unreadable, starting fresh");
            StateMap::new()
        }
    }
}
