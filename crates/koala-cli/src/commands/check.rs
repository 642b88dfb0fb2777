use koala_core::{Config, Decision, Interceptor, Store};

/// Stand-in for the navigation hook: run the decision for one URL.
pub fn run(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    store.ensure_defaults()?;
    let config = Config::load_or_default();

    let interceptor = Interceptor::new(&store, config.intercept.page);
    match interceptor.check_navigation(url)? {
        Decision::Allow => println!("allow"),
        Decision::Redirect(target) => println!("redirect {target}"),
    }
    Ok(())
}
