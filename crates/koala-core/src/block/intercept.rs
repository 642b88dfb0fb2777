//! Navigation interception decisions.
//!
//! The hosting navigation hook calls [`Interceptor::check_navigation`]
//! with every outgoing page load and acts on the returned
//! [`Decision`]. The interceptor owns the side effects the matcher
//! itself does not: the stats update and the redirect target.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::matcher;
use crate::error::Result;
use crate::storage::Store;

/// Query parameter appended when the user chooses to proceed to a
/// blocked site, so the very next load is not intercepted again.
pub const BYPASS_PARAM: &str = "koala_bypass";

/// Stored interception switch. Lives in the store so toggles from any
/// surface take effect on the next navigation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterceptConfig {
    pub enabled: bool,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the navigation through.
    Allow,
    /// Cancel the navigation and load this URL instead.
    Redirect(String),
}

impl Decision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Decision::Redirect(_))
    }
}

/// Decides, per navigation, whether to redirect to the interstitial
/// study page.
pub struct Interceptor<'a> {
    store: &'a Store,
    page: String,
}

impl<'a> Interceptor<'a> {
    /// `page` is the interstitial location the redirect points at
    /// (`Config::intercept.page`).
    pub fn new(store: &'a Store, page: impl Into<String>) -> Self {
        Self {
            store,
            page: page.into(),
        }
    }

    /// Run the full decision for one navigation target.
    ///
    /// Order matters: bypass marker first, then the enabled switch,
    /// then the pattern match. Only a positive match touches the
    /// stats.
    pub fn check_navigation(&self, request_url: &str) -> Result<Decision> {
        if has_bypass(request_url) {
            return Ok(Decision::Allow);
        }

        let config = self.store.intercept_config()?;
        if !config.enabled {
            return Ok(Decision::Allow);
        }

        let sites = self.store.blocked_sites()?;
        if sites.is_empty() {
            return Ok(Decision::Allow);
        }

        let patterns = sites.iter().map(|s| s.url.as_str());
        if !matcher::is_blocked(request_url, patterns) {
            return Ok(Decision::Allow);
        }

        let mut stats = self.store.block_stats()?;
        stats.record_block(Utc::now());
        self.store.set_block_stats(&stats)?;

        log::info!("intercepting navigation to {request_url}");
        Ok(Decision::Redirect(self.redirect_target(request_url)))
    }

    /// `<interstitial>?original=<url-encoded original URL>`.
    pub fn redirect_target(&self, original: &str) -> String {
        format!("{}?original={}", self.page, urlencoding::encode(original))
    }
}

/// Whether the URL already carries the bypass marker.
fn has_bypass(request_url: &str) -> bool {
    match url::Url::parse(request_url) {
        Ok(parsed) => parsed
            .query_pairs()
            .any(|(k, v)| k == BYPASS_PARAM && v == "true"),
        // Scheme-less input; fall back to a plain substring check.
        Err(_) => request_url.contains("koala_bypass=true"),
    }
}

/// The "continue anyway" target: the original URL with the bypass
/// marker appended.
pub fn bypass_url(original: &str) -> Result<String, url::ParseError> {
    let mut parsed = url::Url::parse(original)?;
    parsed
        .query_pairs_mut()
        .append_pair(BYPASS_PARAM, "true");
    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bypass_url_appends_marker() {
        let out = bypass_url("https://facebook.com/feed").unwrap();
        assert_eq!(out, "https://facebook.com/feed?koala_bypass=true");
    }

    #[test]
    fn bypass_url_keeps_existing_query() {
        let out = bypass_url("https://a.com/x?p=1").unwrap();
        assert_eq!(out, "https://a.com/x?p=1&koala_bypass=true");
    }

    #[test]
    fn has_bypass_detects_marker() {
        assert!(has_bypass("https://a.com/?koala_bypass=true"));
        assert!(has_bypass("https://a.com/x?p=1&koala_bypass=true"));
        assert!(!has_bypass("https://a.com/x?p=1"));
        // Unparseable input still honors the marker.
        assert!(has_bypass("a.com/x?koala_bypass=true"));
    }
}
