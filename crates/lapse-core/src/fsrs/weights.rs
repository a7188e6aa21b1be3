//! Named FSRS-4.5 weights
//!
//! Callers exchange the weights as a flat 17-element vector. Internally the
//! formulas read named fields, mapped once from that vector by
//! [`Weights::from_slice`]. [`Weights::to_array`] gives the exact vector back.

use serde::{Deserialize, Serialize};

use super::algorithm::{FSRS45_WEIGHTS, WEIGHT_COUNT};
use super::error::{Result, SchedulerError};

/// The 17 FSRS-4.5 weights, by role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Weights {
    /// w0..w3: initial stability for Again, Hard, Good, Easy
    pub(crate) initial_stability: [f64; 4],
    /// w4: initial difficulty of a card first graded Good
    pub(crate) difficulty_baseline: f64,
    /// w5: initial difficulty offset per grade step away from Good
    pub(crate) difficulty_grade_offset: f64,
    /// w6: difficulty change per grade step on review
    pub(crate) difficulty_review_step: f64,
    /// w7: pull of the reviewed difficulty back toward the baseline
    pub(crate) difficulty_mean_reversion: f64,
    /// w8: log-scale of recall stability growth
    pub(crate) recall_growth_log_scale: f64,
    /// w9: recall growth damping by current stability
    pub(crate) recall_stability_damping: f64,
    /// w10: recall growth gain from forgetting risk
    pub(crate) recall_retrievability_gain: f64,
    /// w11: post-lapse stability scale
    pub(crate) lapse_scale: f64,
    /// w12: post-lapse difficulty exponent
    pub(crate) lapse_difficulty_exponent: f64,
    /// w13: post-lapse exponent on prior stability
    pub(crate) lapse_stability_exponent: f64,
    /// w14: post-lapse gain from forgetting risk
    pub(crate) lapse_retrievability_gain: f64,
    /// w15: recall growth multiplier for Hard
    pub(crate) hard_penalty: f64,
    /// w16: recall growth multiplier for Easy
    pub(crate) easy_bonus: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self::from_array(FSRS45_WEIGHTS)
    }
}

impl Weights {
    /// Map a flat weight vector onto named weights.
    ///
    /// Fails with [`SchedulerError::InvalidConfiguration`] when the vector is
    /// not exactly 17 entries long or holds a NaN/infinite entry. Weight
    /// semantics (signs, magnitudes) are not checked.
    pub fn from_slice(w: &[f64]) -> Result<Self> {
        let array: [f64; WEIGHT_COUNT] = w.try_into().map_err(|_| {
            SchedulerError::InvalidConfiguration(format!(
                "expected {} weights, got {}",
                WEIGHT_COUNT,
                w.len()
            ))
        })?;

        if let Some((index, value)) = array.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SchedulerError::InvalidConfiguration(format!(
                "weight w[{}] is not finite: {}",
                index, value
            )));
        }

        Ok(Self::from_array(array))
    }

    fn from_array(w: [f64; WEIGHT_COUNT]) -> Self {
        Self {
            initial_stability: [w[0], w[1], w[2], w[3]],
            difficulty_baseline: w[4],
            difficulty_grade_offset: w[5],
            difficulty_review_step: w[6],
            difficulty_mean_reversion: w[7],
            recall_growth_log_scale: w[8],
            recall_stability_damping: w[9],
            recall_retrievability_gain: w[10],
            lapse_scale: w[11],
            lapse_difficulty_exponent: w[12],
            lapse_stability_exponent: w[13],
            lapse_retrievability_gain: w[14],
            hard_penalty: w[15],
            easy_bonus: w[16],
        }
    }

    /// Flat weight vector in FSRS index order.
    pub fn to_array(&self) -> [f64; WEIGHT_COUNT] {
        let [s0, s1, s2, s3] = self.initial_stability;
        [
            s0,
            s1,
            s2,
            s3,
            self.difficulty_baseline,
            self.difficulty_grade_offset,
            self.difficulty_review_step,
            self.difficulty_mean_reversion,
            self.recall_growth_log_scale,
            self.recall_stability_damping,
            self.recall_retrievability_gain,
            self.lapse_scale,
            self.lapse_difficulty_exponent,
            self.lapse_stability_exponent,
            self.lapse_retrievability_gain,
            self.hard_penalty,
            self.easy_bonus,
        ]
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = SchedulerError;

    fn try_from(w: Vec<f64>) -> Result<Self> {
        Self::from_slice(&w)
    }
}

impl From<Weights> for Vec<f64> {
    fn from(weights: Weights) -> Self {
        weights.to_array().to_vec()
    }
}
