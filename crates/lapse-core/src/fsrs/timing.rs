//! Wall-clock helpers
//!
//! The scheduler works in real-valued days and never reads a clock. These
//! convert between timestamps the caller stores and the day counts it passes
//! to [`super::Deck::grade_card`].

use chrono::{DateTime, Duration, Utc};

use super::scheduler::Card;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days from `last_review` to `now`.
///
/// Clock skew (`now` before `last_review`) counts as zero elapsed days.
pub fn elapsed_days(last_review: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - last_review).num_seconds().max(0);
    seconds as f64 / SECONDS_PER_DAY
}

/// When `card` is next due if it was reviewed at `reviewed_at`.
///
/// `None` if the interval runs past the representable date range.
pub fn due_at(reviewed_at: DateTime<Utc>, card: &Card) -> Option<DateTime<Utc>> {
    let seconds = (card.interval() * SECONDS_PER_DAY).round();
    if !seconds.is_finite() || seconds > i64::MAX as f64 {
        return None;
    }
    let delta = Duration::try_seconds(seconds as i64)?;
    reviewed_at.checked_add_signed(delta)
}
