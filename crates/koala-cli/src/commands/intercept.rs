use clap::Subcommand;
use koala_core::{InterceptConfig, Store};

#[derive(Subcommand)]
pub enum InterceptAction {
    /// Show whether interception is enabled
    Status,
    /// Enable blocking
    Enable,
    /// Disable blocking (resets your Koala Kudos)
    Disable,
}

pub fn run(action: InterceptAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    store.ensure_defaults()?;

    match action {
        InterceptAction::Status => {
            let config = store.intercept_config()?;
            println!(
                "Interception is {}",
                if config.enabled { "enabled" } else { "disabled" }
            );
        }
        InterceptAction::Enable => {
            store.set_intercept_config(&InterceptConfig { enabled: true })?;
            println!("Interception enabled");
        }
        InterceptAction::Disable => {
            // Turning the blocker off forfeits the score.
            store.set_intercept_config(&InterceptConfig { enabled: false })?;
            store.reset_score()?;
            println!("Interception disabled; score reset to 0");
        }
    }
    Ok(())
}
