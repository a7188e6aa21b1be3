//! # Lapse Core
//!
//! Spaced repetition scheduling for a single flashcard, using the FSRS-4.5
//! memory model.
//!
//! - **Retrievability**: probability of recall after `t` days, `R(S, S) = 0.9`
//! - **Difficulty**: how hard a card is to strengthen, clamped to [1, 10]
//! - **Stability**: separate recall and lapse transitions, selected by grade
//! - **Interval**: days until recall probability falls to the target retention
//!
//! Every operation is a pure function of its inputs and of an immutable
//! [`Deck`] configuration. The caller owns card storage and decides when a
//! card is reviewed.
//!
//! ## Quick Start
//!
//! ```rust
//! use lapse_core::{Deck, Grade};
//!
//! let deck = Deck::default();
//!
//! // First review
//! let card = deck.new_card(Grade::Good)?;
//! assert_eq!(card.stability(), 2.4);
//!
//! // Reviewed again on schedule
//! let next = deck.grade_card(&card, card.interval(), Grade::Good)?;
//! assert!(next.interval() > card.interval());
//! # Ok::<(), lapse_core::SchedulerError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod fsrs;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// FSRS-4.5 algorithm
pub use fsrs::{
    Card,
    Deck,
    DeckParams,
    Grade,
    PreviewResults,
    Result,
    SchedulerError,
    Weights,
    // Core functions for advanced usage
    initial_difficulty,
    initial_stability,
    next_interval,
    retrievability,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FSRS algorithm version (4.5 = 17 parameters)
pub const FSRS_VERSION: &str = "4.5";

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{Card, Deck, DeckParams, Grade, PreviewResults, Result, SchedulerError};
}
