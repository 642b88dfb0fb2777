use clap::Subcommand;
use koala_core::Store;

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Show the current score
    Show,
    /// Reset the score to zero
    Reset,
}

pub fn run(action: ScoreAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        ScoreAction::Show => {
            println!("Koala Kudos: {}", store.score()?);
        }
        ScoreAction::Reset => {
            store.reset_score()?;
            println!("Score reset to 0");
        }
    }
    Ok(())
}
