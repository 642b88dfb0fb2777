//! Flashcard records and deck management.

use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category assigned to manually entered cards.
pub const CATEGORY_MANUAL: &str = "General";
/// Category assigned to CSV-imported cards with no category field.
pub const CATEGORY_IMPORTED: &str = "Imported";
/// Category assigned to service-generated cards.
pub const CATEGORY_GENERATED: &str = "AI Generated";

/// A single front/back card. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flashcard {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub category: String,
}

impl Flashcard {
    /// The card shown when the deck is empty.
    pub fn welcome() -> Self {
        Self {
            id: 1,
            front: "Welcome to Koala!".into(),
            back: "This is a flashcard feature. Add your own flashcards in the dashboard!"
                .into(),
            category: "Welcome".into(),
        }
    }
}

/// The user's deck of flashcards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: Vec<Flashcard>,
}

impl Deck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Flashcard> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Manually add a card. Front and back are required; a blank
    /// category falls back to "General".
    pub fn add(
        &mut self,
        front: &str,
        back: &str,
        category: &str,
    ) -> Result<&Flashcard, ValidationError> {
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() || back.is_empty() {
            return Err(ValidationError::EmptyFlashcardField);
        }

        let category = category.trim();
        // Same-millisecond adds nudge the timestamp id forward.
        let mut id = Utc::now().timestamp_millis();
        if let Some(last) = self.cards.last() {
            if id <= last.id {
                id = last.id + 1;
            }
        }
        self.cards.push(Flashcard {
            id,
            front: front.to_string(),
            back: back.to_string(),
            category: if category.is_empty() {
                CATEGORY_MANUAL.to_string()
            } else {
                category.to_string()
            },
        });
        Ok(self.cards.last().unwrap())
    }

    /// Append a batch of already-built cards (CSV import, generation).
    pub fn merge(&mut self, cards: Vec<Flashcard>) {
        self.cards.extend(cards);
    }

    /// Remove by id. Returns true when a card was dropped.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        self.cards.len() != before
    }

    /// Random card for a practice round; the welcome card when the
    /// deck is empty.
    pub fn draw(&self) -> Flashcard {
        self.cards
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(Flashcard::welcome)
    }
}
