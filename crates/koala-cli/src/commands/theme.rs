use clap::Subcommand;
use koala_core::Store;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the current theme
    Show,
    /// Flip between dark and light
    Toggle,
    /// Set the theme explicitly
    Set {
        /// "dark" or "light"
        theme: String,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        ThemeAction::Show => {
            println!("{}", theme_name(store.dark_mode()?));
        }
        ThemeAction::Toggle => {
            let dark = !store.dark_mode()?;
            store.set_dark_mode(dark)?;
            println!("Theme set to {}", theme_name(dark));
        }
        ThemeAction::Set { theme } => {
            let dark = match theme.as_str() {
                "dark" => true,
                "light" => false,
                other => return Err(format!("Unknown theme '{other}'; use dark or light").into()),
            };
            store.set_dark_mode(dark)?;
            println!("Theme set to {}", theme_name(dark));
        }
    }
    Ok(())
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}
