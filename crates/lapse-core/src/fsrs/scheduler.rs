//! FSRS Scheduler
//!
//! Binds one configuration (target retention + weights) into a [`Deck`] and
//! exposes the card transitions over it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::algorithm::{
    DEFAULT_RETENTION, ensure_difficulty, ensure_elapsed_days, ensure_retention,
    ensure_stability, initial_difficulty_with_weights, initial_stability_with_weights,
    next_difficulty_with_weights, next_interval, next_stability_with_weights, retrievability,
};
use super::error::{Result, SchedulerError};
use super::weights::Weights;

// ============================================================================
// GRADE
// ============================================================================

/// Reviewer's recall outcome for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Grade {
    /// Forgot the card
    Again = 1,
    /// Recalled with serious difficulty
    Hard = 2,
    /// Recalled after hesitation
    Good = 3,
    /// Recalled instantly
    Easy = 4,
}

impl Grade {
    /// All grades, in order
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    /// Numeric value (1-4)
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// True for the lapse transition
    pub fn is_lapse(self) -> bool {
        self == Grade::Again
    }

    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }

    /// Signed distance from Good, `G - 3`
    pub(crate) fn steps_from_good(self) -> f64 {
        f64::from(self.as_u8()) - 3.0
    }
}

impl TryFrom<i64> for Grade {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Good),
            4 => Ok(Grade::Easy),
            other => Err(SchedulerError::InvalidGrade(other)),
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self> {
        Grade::try_from(i64::from(value))
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.as_u8()
    }
}

impl FromStr for Grade {
    type Err = SchedulerError;

    /// Accepts a name (`again`, `hard`, `good`, `easy`, any case) or a number
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "again" => Ok(Grade::Again),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            _ => match trimmed.parse::<i64>() {
                Ok(value) => Grade::try_from(value),
                Err(_) => Err(SchedulerError::UnrecognizedGrade(s.to_string())),
            },
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CARD
// ============================================================================

/// Memory state of one card after a review.
///
/// Immutable: every transition returns a new card. The interval is derived
/// from stability and the deck's retention, so it has no setter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "D")]
    difficulty: f64,
    #[serde(rename = "S")]
    stability: f64,
    #[serde(rename = "I")]
    interval: f64,
}

impl Card {
    /// Rebuild a card from caller storage.
    ///
    /// Values are checked when the card is next graded, not here.
    pub fn from_parts(difficulty: f64, stability: f64, interval: f64) -> Self {
        Self {
            difficulty,
            stability,
            interval,
        }
    }

    /// Difficulty, 1-10
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Stability in days
    pub fn stability(&self) -> f64 {
        self.stability
    }

    /// Days until the next review
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Deck configuration as supplied by the caller.
///
/// Absent fields take the defaults. Present fields are used as given and
/// validated, so an explicit zero or empty vector is an error rather than a
/// request for the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckParams {
    /// Target recall probability at the next review, in (0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_retention_rate: Option<f64>,
    /// Flat 17-element weight vector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<Vec<f64>>,
}

impl DeckParams {
    /// Parse the JSON form, `{"requestedRetentionRate": 0.9, "w": [...]}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SchedulerError::InvalidConfiguration(format!("malformed params: {}", e)))
    }
}

// ============================================================================
// DECK
// ============================================================================

/// Outcome of each possible grade for one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewResults {
    /// Card if graded Again
    pub again: Card,
    /// Card if graded Hard
    pub hard: Card,
    /// Card if graded Good
    pub good: Card,
    /// Card if graded Easy
    pub easy: Card,
}

impl PreviewResults {
    /// Successor card for a grade
    pub fn get(&self, grade: Grade) -> &Card {
        match grade {
            Grade::Again => &self.again,
            Grade::Hard => &self.hard,
            Grade::Good => &self.good,
            Grade::Easy => &self.easy,
        }
    }
}

/// FSRS-4.5 formulas bound to one configuration.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    requested_retention_rate: f64,
    weights: Weights,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            requested_retention_rate: DEFAULT_RETENTION,
            weights: Weights::default(),
        }
    }
}

impl Deck {
    /// Bind a configuration, validating it up front
    pub fn new(params: DeckParams) -> Result<Self> {
        let requested_retention_rate = match params.requested_retention_rate {
            Some(rate) => ensure_retention(rate)?,
            None => DEFAULT_RETENTION,
        };
        let weights = match params.w {
            Some(w) => Weights::from_slice(&w)?,
            None => Weights::default(),
        };

        Self::with_weights(weights, requested_retention_rate)
    }

    /// Bind already-mapped weights
    pub fn with_weights(weights: Weights, requested_retention_rate: f64) -> Result<Self> {
        let requested_retention_rate = ensure_retention(requested_retention_rate)?;

        debug!(
            retention = requested_retention_rate,
            weights = ?weights.to_array(),
            "Deck configured"
        );

        Ok(Self {
            requested_retention_rate,
            weights,
        })
    }

    /// Target retention
    pub fn requested_retention_rate(&self) -> f64 {
        self.requested_retention_rate
    }

    /// Bound weights
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Configuration in caller form, with every field present
    pub fn params(&self) -> DeckParams {
        DeckParams {
            requested_retention_rate: Some(self.requested_retention_rate),
            w: Some(self.weights.to_array().to_vec()),
        }
    }

    /// Card after its first review
    pub fn new_card(&self, grade: Grade) -> Result<Card> {
        let difficulty = initial_difficulty_with_weights(&self.weights, grade);
        let stability = initial_stability_with_weights(&self.weights, grade);
        let interval = next_interval(self.requested_retention_rate, stability)?;

        trace!(%grade, difficulty, stability, interval, "New card");

        Ok(Card {
            difficulty,
            stability,
            interval,
        })
    }

    /// Card after a later review, `days_since_review` days after the last one.
    ///
    /// Retrievability is taken at the old stability before anything is
    /// updated. The new difficulty feeds the stability branch.
    pub fn grade_card(&self, card: &Card, days_since_review: f64, grade: Grade) -> Result<Card> {
        let stability = ensure_stability(card.stability)?;
        let difficulty = ensure_difficulty(card.difficulty)?;
        let r = retrievability(days_since_review, stability)?;

        let next_difficulty = next_difficulty_with_weights(&self.weights, difficulty, grade);
        let next_stability =
            next_stability_with_weights(&self.weights, next_difficulty, stability, r, grade);
        let interval = next_interval(self.requested_retention_rate, next_stability)?;

        trace!(
            %grade,
            lapse = grade.is_lapse(),
            retrievability = r,
            difficulty = next_difficulty,
            stability = next_stability,
            interval,
            "Card graded"
        );

        Ok(Card {
            difficulty: next_difficulty,
            stability: next_stability,
            interval,
        })
    }

    /// Probability of recalling `card` after `elapsed_days`
    pub fn retrievability(&self, card: &Card, elapsed_days: f64) -> Result<f64> {
        retrievability(elapsed_days, card.stability)
    }

    /// Successor card for every grade
    pub fn preview(&self, card: &Card, days_since_review: f64) -> Result<PreviewResults> {
        Ok(PreviewResults {
            again: self.grade_card(card, days_since_review, Grade::Again)?,
            hard: self.grade_card(card, days_since_review, Grade::Hard)?,
            good: self.grade_card(card, days_since_review, Grade::Good)?,
            easy: self.grade_card(card, days_since_review, Grade::Easy)?,
        })
    }

    /// Review history where every review lands exactly on schedule.
    ///
    /// `first` creates the card; each later grade is applied after the
    /// previous card's interval. Returns every state, first card included.
    pub fn replay(&self, first: Grade, grades: &[Grade]) -> Result<Vec<Card>> {
        let mut cards = Vec::with_capacity(grades.len() + 1);
        let mut card = self.new_card(first)?;
        cards.push(card);

        for &grade in grades {
            card = self.grade_card(&card, card.interval, grade)?;
            cards.push(card);
        }

        Ok(cards)
    }
}

// ============================================================================
// TESTS
// ============================================================================
