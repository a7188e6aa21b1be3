//! FSRS-4.5 formulas
//!
//! Pure functions over (difficulty, stability, elapsed days, grade). Nothing
//! here holds state; the bound configuration lives in [`super::Deck`].
//!
//! Retrievability and interval validate their inputs. The difficulty and
//! stability formulas take a typed [`Grade`] and expect in-domain values
//! (`1 <= D <= 10`, `S > 0`, `0 < r <= 1`); [`super::Deck::grade_card`]
//! checks those before calling them.

use super::error::{Result, SchedulerError};
use super::scheduler::Grade;
use super::weights::Weights;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Forgetting curve exponent
pub const DECAY: f64 = -0.5;

/// Forgetting curve factor, `0.9^(1/DECAY) - 1`, so that `R(S, S) = 0.9`
pub const FACTOR: f64 = 19.0 / 81.0;

/// Default target retention
pub const DEFAULT_RETENTION: f64 = 0.9;

/// Number of weights in the FSRS-4.5 model
pub const WEIGHT_COUNT: usize = 17;

/// FSRS-4.5 reference weights
pub const FSRS45_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.4, 0.6, 2.4, 5.8, // w0-w3: initial stability per grade
    4.93, 0.94, 0.86, 0.01, // w4-w7: difficulty
    1.49, 0.14, 0.94, // w8-w10: recall stability
    2.18, 0.05, 0.34, 1.26, // w11-w14: lapse stability
    0.29, 2.61, // w15-w16: hard penalty, easy bonus
];

/// Lower difficulty bound
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Upper difficulty bound
pub const MAX_DIFFICULTY: f64 = 10.0;

// ============================================================================
// INPUT CHECKS
// ============================================================================

pub(crate) fn ensure_stability(stability: f64) -> Result<f64> {
    if stability.is_finite() && stability > 0.0 {
        Ok(stability)
    } else {
        Err(SchedulerError::InvalidStability(stability))
    }
}

pub(crate) fn ensure_difficulty(difficulty: f64) -> Result<f64> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        Ok(difficulty)
    } else {
        Err(SchedulerError::InvalidDifficulty(difficulty))
    }
}

pub(crate) fn ensure_elapsed_days(elapsed_days: f64) -> Result<f64> {
    if elapsed_days.is_finite() && elapsed_days >= 0.0 {
        Ok(elapsed_days)
    } else {
        Err(SchedulerError::InvalidElapsedDays(elapsed_days))
    }
}

/// Retention must lie in (0, 1] and keep `R^(1/DECAY)` finite, which rules
/// out values below roughly 1e-154.
pub(crate) fn ensure_retention(retention: f64) -> Result<f64> {
    if retention > 0.0 && retention <= 1.0 && interval_scale(retention).is_finite() {
        Ok(retention)
    } else {
        Err(SchedulerError::InvalidRetentionRate(retention))
    }
}

fn interval_scale(retention: f64) -> f64 {
    retention.powf(1.0 / DECAY) - 1.0
}

// ============================================================================
// FORGETTING CURVE
// ============================================================================

/// Probability of recall after `elapsed_days` for a memory of the given stability.
///
/// `R = (1 + FACTOR * t / S)^DECAY`. Equals 1 at `t = 0` and exactly 0.9 at `t = S`.
pub fn retrievability(elapsed_days: f64, stability: f64) -> Result<f64> {
    let stability = ensure_stability(stability)?;
    let elapsed_days = ensure_elapsed_days(elapsed_days)?;
    Ok((1.0 + FACTOR * elapsed_days / stability).powf(DECAY))
}

/// Days until retrievability falls to `retention`, the inverse of [`retrievability`].
///
/// `t = S / FACTOR * (R^(1/DECAY) - 1)`. At `retention = 0.9` this is `S`.
pub fn next_interval(retention: f64, stability: f64) -> Result<f64> {
    let retention = ensure_retention(retention)?;
    let stability = ensure_stability(stability)?;
    let interval = stability / FACTOR * interval_scale(retention);
    if !interval.is_finite() {
        return Err(SchedulerError::InvalidStability(stability));
    }
    Ok(interval)
}

fn clamp_difficulty(difficulty: f64) -> f64 {
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

// ============================================================================
// FIRST EXPOSURE
// ============================================================================

/// Initial stability for a first grade, using the reference weights
pub fn initial_stability(grade: Grade) -> f64 {
    initial_stability_with_weights(&Weights::default(), grade)
}

/// Initial stability: the grade's own weight, `w[G-1]`
pub fn initial_stability_with_weights(weights: &Weights, grade: Grade) -> f64 {
    weights.initial_stability[grade.index()]
}

/// Initial difficulty for a first grade, using the reference weights
pub fn initial_difficulty(grade: Grade) -> f64 {
    initial_difficulty_with_weights(&Weights::default(), grade)
}

/// Initial difficulty: `clamp(w4 + (G - 3) * w5, 1, 10)`
pub fn initial_difficulty_with_weights(weights: &Weights, grade: Grade) -> f64 {
    clamp_difficulty(
        weights.difficulty_baseline + grade.steps_from_good() * weights.difficulty_grade_offset,
    )
}

// ============================================================================
// SUBSEQUENT REVIEWS
// ============================================================================

/// Difficulty after a review, using the reference weights
pub fn next_difficulty(difficulty: f64, grade: Grade) -> f64 {
    next_difficulty_with_weights(&Weights::default(), difficulty, grade)
}

/// Difficulty after a review.
///
/// `clamp(w7 * D0(Good) + (1 - w7) * (D - w6 * (G - 3)), 1, 10)`. Shared by
/// both stability branches.
pub fn next_difficulty_with_weights(weights: &Weights, difficulty: f64, grade: Grade) -> f64 {
    let baseline = initial_difficulty_with_weights(weights, Grade::Good);
    let adjusted = difficulty - weights.difficulty_review_step * grade.steps_from_good();
    let reversion = weights.difficulty_mean_reversion;

    clamp_difficulty(reversion * baseline + (1.0 - reversion) * adjusted)
}

/// Stability after a successful recall (Hard, Good or Easy).
///
/// `S * (1 + e^w8 * (11 - D) * S^-w9 * (e^((1 - r) * w10) - 1) * hard * easy)`
/// where `D` is the already-updated difficulty and `r` the retrievability at
/// the old stability.
pub fn next_recall_stability_with_weights(
    weights: &Weights,
    difficulty: f64,
    stability: f64,
    retrievability: f64,
    grade: Grade,
) -> f64 {
    let hard_penalty = if grade == Grade::Hard {
        weights.hard_penalty
    } else {
        1.0
    };
    let easy_bonus = if grade == Grade::Easy {
        weights.easy_bonus
    } else {
        1.0
    };

    let growth = weights.recall_growth_log_scale.exp()
        * (11.0 - difficulty)
        * stability.powf(-weights.recall_stability_damping)
        * ((1.0 - retrievability) * weights.recall_retrievability_gain).exp_m1()
        * hard_penalty
        * easy_bonus;

    stability * (1.0 + growth)
}

/// Stability after a lapse (Again).
///
/// `w11 * D^-w12 * ((S + 1)^w13 - 1) * e^((1 - r) * w14)`. Recomputed from
/// difficulty and prior stability rather than decayed from `S`.
pub fn next_forget_stability_with_weights(
    weights: &Weights,
    difficulty: f64,
    stability: f64,
    retrievability: f64,
) -> f64 {
    weights.lapse_scale
        * difficulty.powf(-weights.lapse_difficulty_exponent)
        * ((stability + 1.0).powf(weights.lapse_stability_exponent) - 1.0)
        * ((1.0 - retrievability) * weights.lapse_retrievability_gain).exp()
}

/// Stability after a review, picking the lapse or recall branch by grade
pub fn next_stability_with_weights(
    weights: &Weights,
    difficulty: f64,
    stability: f64,
    retrievability: f64,
    grade: Grade,
) -> f64 {
    match grade {
        Grade::Again => {
            next_forget_stability_with_weights(weights, difficulty, stability, retrievability)
        }
        Grade::Hard | Grade::Good | Grade::Easy => next_recall_stability_with_weights(
            weights,
            difficulty,
            stability,
            retrievability,
            grade,
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
