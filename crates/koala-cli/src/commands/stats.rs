use clap::Subcommand;
use koala_core::{Mood, Store};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Blocking statistics
    Blocks,
    /// Study statistics
    Study,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        StatsAction::Blocks => {
            let sites = store.blocked_sites()?;
            let stats = store.block_stats()?;
            println!("Sites blocked:  {}", sites.len());
            println!("Total blocks:   {}", stats.total_blocked);
            println!("Blocks today:   {}", stats.today_blocked);
            if let Some(day) = &stats.last_blocked {
                println!("Last block day: {day}");
            }
        }
        StatsAction::Study => {
            let board = store.scoreboard()?;
            let mood = Mood::from_scoreboard(&board);
            println!("Score:     {}", board.score);
            println!("Streak:    {}", board.streak);
            println!("Best:      {}", board.best_streak);
            println!("Answered:  {}", board.total_answered);
            println!("Accuracy:  {:.0}%", board.accuracy());
            println!("Koala is {}: {}", mood.label(), mood.message(&board));
        }
    }
    Ok(())
}
