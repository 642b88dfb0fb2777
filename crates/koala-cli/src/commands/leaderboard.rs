use clap::Subcommand;
use koala_core::{Config, LeaderboardClient, Store};

#[derive(Subcommand)]
pub enum LeaderboardAction {
    /// Show the top ten
    Top,
    /// Show or set the username scores sync under
    Username {
        /// New username; prints the current one when omitted
        name: Option<String>,
    },
    /// Push the current local score
    Sync,
}

pub fn run(action: LeaderboardAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        LeaderboardAction::Top => {
            let config = Config::load_or_default();
            let client = LeaderboardClient::new(&config.leaderboard)?;
            let rows = client.top10()?;
            if rows.is_empty() {
                println!("Leaderboard is empty.");
            }
            for (rank, row) in rows.iter().enumerate() {
                println!("{:>2}. {}  {}", rank + 1, row.user, row.score);
            }
        }
        LeaderboardAction::Username { name } => match name {
            Some(name) => {
                store.set_username(&name)?;
                println!("Username set to {name}");
            }
            None => println!("{}", store.username()?),
        },
        LeaderboardAction::Sync => {
            let config = Config::load_or_default();
            let client = LeaderboardClient::new(&config.leaderboard)?;
            let username = store.username()?;
            let score = store.score()?;
            client.upsert_score(&username, score)?;
            println!("Synced score {score} for {username}");
        }
    }
    Ok(())
}
