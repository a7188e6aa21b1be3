//! FSRS-4.5 (Free Spaced Repetition Scheduler) Module
//!
//! The fixed 17-parameter FSRS-4.5 memory model: given a card's difficulty
//! and stability, the days since its last review, and the reviewer's grade,
//! compute the next difficulty, stability and interval.
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki
//!
//! ## Core Formulas:
//! - Retrievability: R = (1 + FACTOR * t / S)^DECAY where DECAY = -0.5, FACTOR = 19/81
//! - Interval: t = S/FACTOR * (R^(1/DECAY) - 1)
//! - Difficulty: D' = clamp(w7 * D0(Good) + (1 - w7) * (D - w6 * (G - 3)), 1, 10)
//! - Recall: S' = S * (1 + e^w8 * (11 - D') * S^-w9 * (e^((1-R) * w10) - 1) * hard * easy)
//! - Lapse: S' = w11 * D'^-w12 * ((S + 1)^w13 - 1) * e^((1-R) * w14)

mod algorithm;
mod error;
mod scheduler;
mod timing;
mod weights;

pub use algorithm::{
    initial_difficulty,
    initial_difficulty_with_weights,
    initial_stability,
    initial_stability_with_weights,
    next_difficulty,
    next_difficulty_with_weights,
    next_forget_stability_with_weights,
    next_interval,
    next_recall_stability_with_weights,
    next_stability_with_weights,
    // Core functions
    retrievability,
    DECAY,
    DEFAULT_RETENTION,
    FACTOR,
    // Constants
    FSRS45_WEIGHTS,
    MAX_DIFFICULTY,
    MIN_DIFFICULTY,
    WEIGHT_COUNT,
};

pub use error::{Result, SchedulerError};

pub use scheduler::{Card, Deck, DeckParams, Grade, PreviewResults};

pub use timing::{due_at, elapsed_days};

pub use weights::Weights;
