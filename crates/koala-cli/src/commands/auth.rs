use clap::Subcommand;
use koala_core::{GradingClient, LeaderboardClient};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the AI-service API key in the OS keyring
    SetGradingKey { key: String },
    /// Store the leaderboard service key in the OS keyring
    SetLeaderboardKey { key: String },
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetGradingKey { key } => {
            GradingClient::store_key(&key)?;
            println!("Grading API key stored");
        }
        AuthAction::SetLeaderboardKey { key } => {
            LeaderboardClient::store_key(&key)?;
            println!("Leaderboard key stored");
        }
    }
    Ok(())
}
