pub mod csv;
pub mod flashcard;
pub mod mood;
pub mod score;
pub mod session;

pub use flashcard::{Deck, Flashcard};
pub use mood::Mood;
pub use score::Scoreboard;
pub use session::StudySession;
