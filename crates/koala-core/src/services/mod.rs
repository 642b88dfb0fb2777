pub mod grading;
pub mod leaderboard;

pub use grading::{GradeReport, GradingClient};
pub use leaderboard::{LeaderboardClient, LeaderboardEntry};

use crate::error::ServiceError;

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "koala";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolve a credential: keyring entry first, environment variable as
/// fallback. Empty strings count as absent.
fn resolve_key(keyring_key: &str, env_var: &str) -> Option<String> {
    keyring_store::get(keyring_key)
        .ok()
        .flatten()
        .or_else(|| std::env::var(env_var).ok())
        .filter(|k| !k.is_empty())
}

/// Drive a request future to completion on a one-off current-thread
/// runtime. The clients expose a synchronous API; calls are single
/// round trips with no retry policy.
fn block_on<F>(service: &'static str, fut: F) -> Result<F::Output, ServiceError>
where
    F: std::future::Future,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ServiceError::RequestFailed {
            service,
            message: e.to_string(),
        })?;
    Ok(rt.block_on(fut))
}
