use clap::Subcommand;
use koala_core::{BlockList, Store};

#[derive(Subcommand)]
pub enum SiteAction {
    /// Add a website to the block list
    Add {
        /// Pattern, e.g. facebook.com or https://facebook.com/feed
        pattern: String,
    },
    /// Remove a site by id
    Remove { id: i64 },
    /// List blocked sites
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every blocked site
    Clear,
    /// Write the list as JSON to a file (or stdout)
    Export {
        /// Output path; stdout when omitted
        path: Option<String>,
    },
    /// Replace the list from an exported JSON file
    Import { path: String },
}

pub fn run(action: SiteAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    store.ensure_defaults()?;
    let mut list = BlockList::new(store.blocked_sites()?);

    match action {
        SiteAction::Add { pattern } => {
            let site = list.add(&pattern)?;
            println!("Blocked {} ({})", site.name, site.url);
            store.set_blocked_sites(list.sites())?;
        }
        SiteAction::Remove { id } => {
            if list.remove(id) {
                println!("Removed site {id}");
                store.set_blocked_sites(list.sites())?;
            } else {
                return Err(format!("No blocked site with id {id}").into());
            }
        }
        SiteAction::List { json } => {
            if json {
                println!("{}", list.export_json()?);
            } else if list.is_empty() {
                println!("No sites blocked yet.");
            } else {
                for site in list.sites() {
                    println!("{}  {}  (added {})", site.id, site.url, site.added_date);
                }
            }
        }
        SiteAction::Clear => {
            let count = list.len();
            list.clear();
            store.set_blocked_sites(list.sites())?;
            println!("Cleared {count} sites");
        }
        SiteAction::Export { path } => {
            let json = list.export_json()?;
            match path {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported {} sites to {path}", list.len());
                }
                None => println!("{json}"),
            }
        }
        SiteAction::Import { path } => {
            let json = std::fs::read_to_string(&path)?;
            let count = list.import_json(&json)?;
            store.set_blocked_sites(list.sites())?;
            println!("Imported {count} sites");
        }
    }
    Ok(())
}
