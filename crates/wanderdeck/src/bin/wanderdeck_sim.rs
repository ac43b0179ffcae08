//! # Headless Exploration Simulation
//!
//! Walks a random path through the world with a small French deck, answers
//! every encounter with a random grade and prints what happened.
//!
//! Run with: cargo run --bin wanderdeck_sim -- [config.toml]
//!
//! Logging is controlled by `RUST_LOG` (default `wanderdeck=info`).

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wanderdeck::{GameConfig, Session, SessionResult, StepOutcome};
use wanderdeck_review::{ManualClock, ReviewItem};

/// Upper bound on attempted steps.
const MAX_STEPS: u64 = 200_000;
/// Simulated time per step (60 steps per second).
const STEP_MILLIS: i64 = 1000 / 60;
/// Offset between the encounter seed and the walker seed.
const WALKER_SALT: u64 = 0x5741_4c4b;

const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const WORDS: [(&str, &str); 12] = [
    ("le chat", "the cat"),
    ("le chien", "the dog"),
    ("la maison", "the house"),
    ("l'arbre", "the tree"),
    ("la rivière", "the river"),
    ("le sable", "the sand"),
    ("la pierre", "the stone"),
    ("la fleur", "the flower"),
    ("le pré", "the meadow"),
    ("l'herbe", "the grass"),
    ("le chemin", "the path"),
    ("la carte", "the map"),
];

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wanderdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> SessionResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let deck: Vec<ReviewItem> = (0u64..)
        .zip(WORDS)
        .map(|(id, (question, answer))| ReviewItem::new(id, question, answer))
        .collect();

    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = config.review.open_store();
    let mut session = Session::new(&config, deck, store, Arc::clone(&clock))?;
    let mut walker = ChaCha8Rng::seed_from_u64(config.encounter.rng_seed ^ WALKER_SALT);

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         WANDERDECK - HEADLESS EXPLORATION                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!("  World seed:      {}", config.world.seed);
    println!("  Cards in deck:   {}", session.deck().len());
    println!("  Due right now:   {}", session.queued());
    println!();

    let mut heading = DIRECTIONS[0];
    let mut attempts = 0;
    while attempts < MAX_STEPS && (session.queued() > 0 || session.active_review().is_some()) {
        attempts += 1;
        clock.advance(Duration::milliseconds(STEP_MILLIS));

        // Mostly keep walking straight; turn now and then or when blocked.
        if walker.gen_bool(0.05) {
            heading = DIRECTIONS[walker.gen_range(0..DIRECTIONS.len())];
        }

        match session.step(heading.0, heading.1) {
            StepOutcome::Encounter { item, terrain } => {
                let quality: i64 = walker.gen_range(1..=5);
                let state = match session.answer(quality) {
                    Ok(state) => state,
                    // Progress stays in memory; keep exploring.
                    Err(err) => {
                        tracing::warn!(error = %err, "review not saved");
                        session.card_stats(item.id())
                    }
                };
                println!(
                    "  [{:>6}] {:<12} on {:<6} -> {:<12} grade {}  next in {} day(s)",
                    attempts,
                    item.question(),
                    terrain,
                    item.answer(),
                    quality,
                    state.interval
                );
            }
            StepOutcome::Blocked { .. } => {
                heading = DIRECTIONS[walker.gen_range(0..DIRECTIONS.len())];
            }
            StepOutcome::Moved { .. } | StepOutcome::InReview => {}
        }
    }

    let stats = session.stats();
    let world = session.world().stats();
    println!();
    println!("┌─ SUMMARY ────────────────────────────────────────────────────────┐");
    println!("│ Steps taken:        {}", stats.steps);
    println!("│ Blocked moves:      {}", stats.blocked);
    println!("│ Encounters:         {}", stats.encounters);
    println!("│ Reviews / lapses:   {} / {}", stats.reviews, stats.lapses);
    println!("│ Chunks generated:   {}", world.chunks_generated);
    println!("│ Final position:     {:?} on {}", session.position(), session.terrain_here());
    println!("└──────────────────────────────────────────────────────────────────┘");

    tracing::info!(
        steps = stats.steps,
        encounters = stats.encounters,
        reviews = stats.reviews,
        chunks = world.chunks_generated,
        "simulation finished"
    );

    session.save()
}
