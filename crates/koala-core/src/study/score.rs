//! Score and streak accounting for graded answers.

use serde::{Deserialize, Serialize};

/// The five study counters, persisted as individual store keys and
/// updated together as one read-modify-write unit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scoreboard {
    /// Koala Kudos. +1 per correct answer, -1 per incorrect; may go
    /// negative.
    pub score: i64,
    pub streak: u32,
    pub best_streak: u32,
    pub total_correct: u32,
    pub total_answered: u32,
}

impl Scoreboard {
    /// Apply one graded answer.
    pub fn update(&mut self, correct: bool) {
        self.total_answered += 1;
        if correct {
            self.score += 1;
            self.streak += 1;
            self.total_correct += 1;
            if self.streak > self.best_streak {
                self.best_streak = self.streak;
            }
        } else {
            self.score -= 1;
            self.streak = 0;
        }
    }

    /// Accuracy percentage; 0 when nothing has been answered yet.
    pub fn accuracy(&self) -> f64 {
        if self.total_answered == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_answered) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_bumps_everything() {
        let mut board = Scoreboard::default();
        board.update(true);
        assert_eq!(board.score, 1);
        assert_eq!(board.streak, 1);
        assert_eq!(board.best_streak, 1);
        assert_eq!(board.total_correct, 1);
        assert_eq!(board.total_answered, 1);
    }

    #[test]
    fn incorrect_answer_resets_streak_but_keeps_best() {
        let mut board = Scoreboard::default();
        board.update(true);
        board.update(false);
        assert_eq!(board.score, 0);
        assert_eq!(board.streak, 0);
        assert_eq!(board.best_streak, 1);
        assert_eq!(board.total_correct, 1);
        assert_eq!(board.total_answered, 2);
    }

    #[test]
    fn score_can_go_negative() {
        let mut board = Scoreboard::default();
        board.update(false);
        board.update(false);
        assert_eq!(board.score, -2);
    }

    #[test]
    fn best_streak_tracks_running_max() {
        let mut board = Scoreboard::default();
        for _ in 0..3 {
            board.update(true);
        }
        board.update(false);
        board.update(true);
        assert_eq!(board.streak, 1);
        assert_eq!(board.best_streak, 3);
    }

    #[test]
    fn accuracy_is_zero_with_no_answers() {
        assert_eq!(Scoreboard::default().accuracy(), 0.0);
    }

    #[test]
    fn accuracy_percentage() {
        let mut board = Scoreboard::default();
        board.update(true);
        board.update(true);
        board.update(false);
        board.update(true);
        assert_eq!(board.accuracy(), 75.0);
    }
}
