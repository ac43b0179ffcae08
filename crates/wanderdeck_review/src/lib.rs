//! # WANDERDECK Review Scheduling
//!
//! Spaced repetition for the cards a player meets while exploring.
//!
//! ## Design Principles
//!
//! 1. **Single mutation point** - Only `process_review` changes a review state
//! 2. **Validate first** - A bad grade is rejected before anything is touched
//! 3. **Whole-map persistence** - The state map is saved and loaded as one unit
//! 4. **Injected time** - "Now" comes from a `Clock`, never from inline wall-clock reads
//!
//! ## Core Components
//!
//! - `ReviewState`: SM-2 record (interval, ease, reps, lapses, due date)
//! - `ReviewScheduler`: Owns the state map, answers "what is due"
//! - `ProgressStore`: Load/save backend (`JsonFileStore`, `MemoryStore`)
//!
//! ## Example
//!
//! ```rust
//! use wanderdeck_review::{ItemId, MemoryStore, ReviewItem, ReviewScheduler, SystemClock};
//!
//! let deck = vec![
//!     ReviewItem::new(1u64, "le chat", "the cat"),
//!     ReviewItem::new(2u64, "le chien", "the dog"),
//! ];
//!
//! let mut scheduler = ReviewScheduler::open(MemoryStore::new(), SystemClock);
//! scheduler.register_items(&deck);
//!
//! // Fresh cards are due immediately.
//! assert_eq!(scheduler.due_now(&deck).len(), 2);
//!
//! scheduler.process_review(&ItemId::from(1u64), 5).unwrap();
//! assert_eq!(scheduler.due_now(&deck).len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod error;
pub mod grade;
pub mod item;
pub mod scheduler;
pub mod state;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ReviewError, ReviewResult};
pub use grade::Grade;
pub use item::{ItemId, ReviewItem, Reviewable};
pub use scheduler::ReviewScheduler;
pub use state::{ReviewState, INITIAL_EASE, MIN_EASE};
pub use store::{JsonFileStore, MemoryStore, ProgressStore, StateMap};
