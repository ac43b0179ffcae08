//! # WANDERDECK
//!
//! Explore an endless tile world; due flashcards jump out of the grass.
//!
//! ## Design Principles
//!
//! 1. **Two independent subsystems** - `wanderdeck_procedural` owns terrain,
//!    `wanderdeck_review` owns scheduling; only the `Session` talks to both
//! 2. **Reproducible** - World seed and encounter seed come from config
//! 3. **Config over constants** - Odds, cooldown and paths live in TOML
//!
//! ## Example
//!
//! ```rust
//! use wanderdeck::{GameConfig, Session, StepOutcome};
//! use wanderdeck_review::{MemoryStore, ReviewItem, SystemClock};
//!
//! let config = GameConfig::from_toml_str("[encounter]\nbase_chance = 1.0\ncooldown_steps = 0\n").unwrap();
//! let deck = vec![ReviewItem::new(0u64, "le soleil", "the sun")];
//! let mut session = Session::new(&config, deck, MemoryStore::new(), SystemClock).unwrap();
//!
//! for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1)] {
//!     if let StepOutcome::Encounter { item, .. } = session.step(dx, dy) {
//!         assert_eq!(item.answer(), "the sun");
//!         session.answer(5).unwrap();
//!         break;
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod encounter;
pub mod error;
pub mod session;

pub use config::{EncounterConfig, GameConfig, ReviewConfig, WorldConfig};
pub use encounter::EncounterRoller;
pub use error::{SessionError, SessionResult};
pub use session::{Session, SessionStats, StepOutcome};
