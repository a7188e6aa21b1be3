//! Review Calendar
//!
//! Plays the caller's part: stores each card with its last review time,
//! keeps a clock, and turns timestamps into elapsed days for the deck.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut calendar = ReviewCalendar::new(reference_deck(), start);
//! calendar.learn("kanji-1", Grade::Good)?;
//! calendar.advance_to_due("kanji-1");
//! calendar.review("kanji-1", Grade::Good)?;
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use lapse_core::fsrs::{due_at, elapsed_days};
use lapse_core::{Card, Deck, Grade, Result};

/// A card as the caller persists it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredCard {
    pub card: Card,
    pub last_review: DateTime<Utc>,
}

/// In-memory card store with a controllable clock
pub struct ReviewCalendar {
    deck: Deck,
    now: DateTime<Utc>,
    cards: HashMap<String, StoredCard>,
    history: Vec<(String, Grade, f64)>,
}

impl ReviewCalendar {
    /// Empty calendar starting at `start`
    pub fn new(deck: Deck, start: DateTime<Utc>) -> Self {
        Self {
            deck,
            now: start,
            cards: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Current clock time
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Move the clock forward
    pub fn advance_days(&mut self, days: f64) {
        let millis = (days * 86_400_000.0).round() as i64;
        self.now += Duration::milliseconds(millis);
    }

    /// Move the clock to the card's due time
    pub fn advance_to_due(&mut self, id: &str) {
        if let Some(due) = self.due(id) {
            if due > self.now {
                self.now = due;
            }
        }
    }

    /// First review of a new card
    pub fn learn(&mut self, id: &str, grade: Grade) -> Result<Card> {
        let card = self.deck.new_card(grade)?;
        self.store(id, card, grade, 0.0);
        Ok(card)
    }

    /// Later review of a stored card at the current clock time
    pub fn review(&mut self, id: &str, grade: Grade) -> Result<Card> {
        let stored = *self.get(id).unwrap_or_else(|| panic!("no card stored as {id}"));
        let elapsed = elapsed_days(stored.last_review, self.now);

        let card = self.deck.grade_card(&stored.card, elapsed, grade)?;
        self.store(id, card, grade, elapsed);
        Ok(card)
    }

    /// Stored state of a card
    pub fn get(&self, id: &str) -> Option<&StoredCard> {
        self.cards.get(id)
    }

    /// When a card is next due
    pub fn due(&self, id: &str) -> Option<DateTime<Utc>> {
        let stored = self.get(id)?;
        due_at(stored.last_review, &stored.card)
    }

    /// Recall probability of a card right now
    pub fn recall_probability(&self, id: &str) -> Option<f64> {
        let stored = self.get(id)?;
        let elapsed = elapsed_days(stored.last_review, self.now);
        self.deck.retrievability(&stored.card, elapsed).ok()
    }

    /// Ids of cards due at the current clock time, sorted
    pub fn due_cards(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .cards
            .keys()
            .filter(|id| self.due(id).is_some_and(|due| due <= self.now))
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Every review so far as (card id, grade, elapsed days)
    pub fn history(&self) -> &[(String, Grade, f64)] {
        &self.history
    }

    fn store(&mut self, id: &str, card: Card, grade: Grade, elapsed: f64) {
        self.cards.insert(
            id.to_string(),
            StoredCard {
                card,
                last_review: self.now,
            },
        );
        self.history.push((id.to_string(), grade, elapsed));
    }
}
