use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "koala-cli", version, about = "Koala CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blocked-site list management
    Site {
        #[command(subcommand)]
        action: commands::site::SiteAction,
    },
    /// Run the interception decision for a URL
    Check {
        /// Navigation target to test
        url: String,
    },
    /// Interception switch
    Intercept {
        #[command(subcommand)]
        action: commands::intercept::InterceptAction,
    },
    /// Flashcard deck management
    Card {
        #[command(subcommand)]
        action: commands::card::CardAction,
    },
    /// Draw a card, answer it, get graded
    Practice,
    /// Score management
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Block and study statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Leaderboard operations
    Leaderboard {
        #[command(subcommand)]
        action: commands::leaderboard::LeaderboardAction,
    },
    /// Theme management
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Demo counter
    Counter {
        #[command(subcommand)]
        action: commands::counter::CounterAction,
    },
    /// Service credentials
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Site { action } => commands::site::run(action),
        Commands::Check { url } => commands::check::run(&url),
        Commands::Intercept { action } => commands::intercept::run(action),
        Commands::Card { action } => commands::card::run(action),
        Commands::Practice => commands::practice::run(),
        Commands::Score { action } => commands::score::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Leaderboard { action } => commands::leaderboard::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Counter { action } => commands::counter::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
