//! Koala mood, derived from answer accuracy.

use super::score::Scoreboard;

/// Accuracy at or above this percentage keeps the koala happy.
pub const ACCURACY_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
}

impl Mood {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= ACCURACY_THRESHOLD {
            Mood::Happy
        } else {
            Mood::Sad
        }
    }

    pub fn from_scoreboard(board: &Scoreboard) -> Self {
        Self::from_accuracy(board.accuracy())
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
        }
    }

    /// Motivational message tiered by streak and accuracy.
    pub fn message(self, board: &Scoreboard) -> String {
        let accuracy = board.accuracy();
        match self {
            Mood::Happy => {
                if board.streak > 5 {
                    format!("Amazing! {} in a row! Keep it up!", board.streak)
                } else if accuracy >= 90.0 {
                    format!("Excellent work! {accuracy:.0}% accuracy!")
                } else {
                    "Great job! You're doing well!".to_string()
                }
            }
            Mood::Sad => {
                if board.streak == 0 && accuracy < 50.0 {
                    "Don't give up! Practice makes perfect!".to_string()
                } else if accuracy < 60.0 {
                    "Keep studying! You can do better!".to_string()
                } else {
                    "Almost there! Just a bit more practice!".to_string()
                }
            }
        }
    }
}
