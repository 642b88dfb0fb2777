use std::io::{self, BufRead, Write};

use koala_core::{Config, GradingClient, LeaderboardClient, Store, StudySession};

/// One interactive practice round: draw, answer, get graded.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    store.ensure_defaults()?;
    let config = Config::load_or_default();

    let grading = GradingClient::new(&config.grading)?;
    // Leaderboard sync is optional; skip silently when unconfigured.
    let leaderboard = LeaderboardClient::new(&config.leaderboard).ok();
    let session = StudySession::new(&store, grading, leaderboard);

    let card = session.draw()?;
    println!("[{}] {}", card.category, card.front);
    print!("Your answer: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let outcome = session.answer(&card, answer.trim())?;
    if outcome.report.passed() {
        println!("Correct! Grade: {}", outcome.report.grade);
    } else {
        println!("Not quite. Grade: {}", outcome.report.grade);
        println!("Feedback: {}", outcome.report.feedback);
    }
    println!(
        "Score: {}  Streak: {}  Best: {}  Accuracy: {:.0}%",
        outcome.board.score,
        outcome.board.streak,
        outcome.board.best_streak,
        outcome.board.accuracy()
    );
    println!("Koala is {}: {}", outcome.mood.label(), outcome.mood.message(&outcome.board));
    Ok(())
}
