//! Study session orchestration: draw a card, grade the answer, update
//! the counters, sync the leaderboard.

use super::flashcard::{Deck, Flashcard};
use super::mood::Mood;
use super::score::Scoreboard;
use crate::error::Result;
use crate::services::{GradeReport, GradingClient, LeaderboardClient};
use crate::storage::Store;

/// Everything a surface needs to render one graded answer.
#[derive(Debug)]
pub struct AnswerOutcome {
    pub report: GradeReport,
    pub board: Scoreboard,
    pub mood: Mood,
}

pub struct StudySession<'a> {
    store: &'a Store,
    grading: GradingClient,
    /// Absent when the leaderboard is not configured; grading still
    /// works, scores just stay local.
    leaderboard: Option<LeaderboardClient>,
}

impl<'a> StudySession<'a> {
    pub fn new(
        store: &'a Store,
        grading: GradingClient,
        leaderboard: Option<LeaderboardClient>,
    ) -> Self {
        Self {
            store,
            grading,
            leaderboard,
        }
    }

    /// Random card from the stored deck; the welcome card when the
    /// deck is empty.
    pub fn draw(&self) -> Result<Flashcard> {
        let deck = Deck::new(self.store.flashcards()?);
        Ok(deck.draw())
    }

    /// Grade one answer and apply its consequences.
    ///
    /// Counter updates are persisted before the leaderboard call; a
    /// sync failure is logged and reported through the outcome's
    /// local state only -- local and remote can diverge, by the same
    /// no-retry policy the rest of the system follows.
    pub fn answer(&self, card: &Flashcard, answer: &str) -> Result<AnswerOutcome> {
        let report = self.grading.grade(card, answer)?;

        let mut board = self.store.scoreboard()?;
        board.update(report.passed());
        self.store.set_scoreboard(&board)?;

        if let Some(leaderboard) = &self.leaderboard {
            let username = self.store.username()?;
            if let Err(e) = leaderboard.upsert_score(&username, board.score) {
                log::warn!("leaderboard sync failed for '{username}': {e}");
            }
        }

        Ok(AnswerOutcome {
            mood: Mood::from_scoreboard(&board),
            report,
            board,
        })
    }
}
