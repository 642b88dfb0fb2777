use clap::Subcommand;
use koala_core::Store;

#[derive(Subcommand)]
pub enum CounterAction {
    /// Show the counter
    Show,
    /// Increment by one
    Increment,
    /// Reset to zero
    Reset,
}

pub fn run(action: CounterAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    store.ensure_defaults()?;

    match action {
        CounterAction::Show => println!("{}", store.count()?),
        CounterAction::Increment => println!("{}", store.increment_count()?),
        CounterAction::Reset => {
            store.reset_count()?;
            println!("0");
        }
    }
    Ok(())
}
