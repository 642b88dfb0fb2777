use clap::Subcommand;
use koala_core::study::csv;
use koala_core::{Config, Deck, GradingClient, Store};

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a flashcard
    Add {
        /// Question text
        front: String,
        /// Answer text
        back: String,
        /// Category; defaults to "General"
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Remove a card by id
    Remove { id: i64 },
    /// List the deck
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import cards from a CSV file (front,back,category)
    ImportCsv { path: String },
    /// Write the deck as CSV to a file (or stdout)
    ExportCsv {
        /// Output path; stdout when omitted
        path: Option<String>,
    },
    /// Generate cards on a topic via the AI service
    Generate {
        topic: String,
        /// How many cards to ask for
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },
}

pub fn run(action: CardAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    store.ensure_defaults()?;
    let mut deck = Deck::new(store.flashcards()?);

    match action {
        CardAction::Add {
            front,
            back,
            category,
        } => {
            let card = deck.add(&front, &back, &category)?;
            println!("Added card {} [{}]", card.id, card.category);
            store.set_flashcards(deck.cards())?;
        }
        CardAction::Remove { id } => {
            if deck.remove(id) {
                println!("Removed card {id}");
                store.set_flashcards(deck.cards())?;
            } else {
                return Err(format!("No flashcard with id {id}").into());
            }
        }
        CardAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(deck.cards())?);
            } else if deck.is_empty() {
                println!("No flashcards yet.");
            } else {
                for card in deck.cards() {
                    println!("{}  [{}] {} -> {}", card.id, card.category, card.front, card.back);
                }
            }
        }
        CardAction::ImportCsv { path } => {
            let cards = csv::import_file(std::path::Path::new(&path))?;
            let count = cards.len();
            deck.merge(cards);
            store.set_flashcards(deck.cards())?;
            println!("Successfully imported {count} flashcards from CSV");
        }
        CardAction::ExportCsv { path } => {
            let text = csv::serialize_csv(deck.cards());
            match path {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("Exported {} cards to {path}", deck.len());
                }
                None => println!("{text}"),
            }
        }
        CardAction::Generate { topic, count } => {
            let config = Config::load_or_default();
            let client = GradingClient::new(&config.grading)?;
            let cards = client.generate_cards(&topic, count)?;
            let generated = cards.len();
            deck.merge(cards);
            store.set_flashcards(deck.cards())?;
            println!("Generated {generated} cards about '{topic}'");
        }
    }
    Ok(())
}
