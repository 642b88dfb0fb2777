//! Blocked-site records and list management.
//!
//! A [`BlockedSite`] keeps the pattern exactly as the user entered it
//! (lower-cased); matching normalization happens in [`super::matcher`].
//! Duplicate detection compares normalized hosts so "facebook.com",
//! "https://facebook.com" and "www.Facebook.com/feed" collapse to one
//! entry.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockedSite {
    /// Creation timestamp in milliseconds, doubling as the record id.
    pub id: i64,
    /// Pattern as entered, trimmed and lower-cased.
    pub url: String,
    /// Display label derived from the host.
    pub name: String,
    /// ISO-8601 creation time.
    pub added_date: String,
    #[serde(default)]
    pub blocked_count: u64,
}

/// Lowercase, strip scheme and a leading `www.`, keep the host part
/// (text before the first `/`).
pub fn normalize_host(input: &str) -> String {
    let s = input.trim().to_lowercase();
    let s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(&s);
    let s = s.strip_prefix("www.").unwrap_or(s);
    s.split('/').next().unwrap_or("").to_string()
}

/// Display label: host with the first letter uppercased.
fn display_name(input: &str) -> String {
    let host = normalize_host(input);
    let mut chars = host.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => host,
    }
}

/// Entry-time pattern check. A pattern must look like a website:
/// contain a dot or start with an http scheme.
pub fn validate_pattern(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || (!trimmed.contains('.') && !trimmed.starts_with("http")) {
        return Err(ValidationError::InvalidSitePattern(trimmed.to_string()));
    }
    Ok(())
}

/// The user's block list with add/remove/import semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockList {
    sites: Vec<BlockedSite>,
}

impl BlockList {
    pub fn new(sites: Vec<BlockedSite>) -> Self {
        Self { sites }
    }

    pub fn sites(&self) -> &[BlockedSite] {
        &self.sites
    }

    pub fn into_sites(self) -> Vec<BlockedSite> {
        self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Patterns in entry order, for the matcher.
    pub fn patterns(&self) -> Vec<String> {
        self.sites.iter().map(|s| s.url.clone()).collect()
    }

    /// Validate and append a new site. Rejects patterns that do not
    /// look like a website and entries whose normalized host is already
    /// present.
    pub fn add(&mut self, input: &str) -> Result<&BlockedSite, ValidationError> {
        validate_pattern(input)?;
        let url = input.trim().to_lowercase();
        let host = normalize_host(&url);

        if self.sites.iter().any(|s| normalize_host(&s.url) == host) {
            return Err(ValidationError::AlreadyBlocked(url));
        }

        let now = Utc::now();
        // Ids are creation timestamps; nudge forward when two adds
        // land in the same millisecond.
        let mut id = now.timestamp_millis();
        if let Some(last) = self.sites.last() {
            if id <= last.id {
                id = last.id + 1;
            }
        }
        self.sites.push(BlockedSite {
            id,
            name: display_name(&url),
            url,
            added_date: now.to_rfc3339(),
            blocked_count: 0,
        });
        Ok(self.sites.last().unwrap())
    }

    /// Remove by id. Returns true when a record was dropped.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.sites.len();
        self.sites.retain(|s| s.id != id);
        self.sites.len() != before
    }

    pub fn clear(&mut self) {
        self.sites.clear();
    }

    /// Pretty-printed JSON array, the site-list export format.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.sites)
    }

    /// Replace the list wholesale from an exported JSON array. Nothing
    /// is mutated when the input does not parse.
    pub fn import_json(&mut self, json: &str) -> Result<usize, ParseError> {
        let imported: Vec<BlockedSite> =
            serde_json::from_str(json).map_err(|e| ParseError::SiteImport(e.to_string()))?;
        let count = imported.len();
        self.sites = imported;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_host_strips_scheme_www_and_path() {
        assert_eq!(normalize_host("https://www.Facebook.com/feed"), "facebook.com");
        assert_eq!(normalize_host("http://reddit.com"), "reddit.com");
        assert_eq!(normalize_host("twitter.com/home"), "twitter.com");
    }

    #[test]
    fn validate_rejects_patterns_without_dot_or_scheme() {
        assert!(validate_pattern("facebook").is_err());
        assert!(validate_pattern("   ").is_err());
        assert!(validate_pattern("facebook.com").is_ok());
        assert!(validate_pattern("http://localhost").is_ok());
    }

    #[test]
    fn add_lowercases_and_derives_name() {
        let mut list = BlockList::default();
        let site = list.add("https://www.Facebook.com/home").unwrap();
        assert_eq!(site.url, "https://www.facebook.com/home");
        assert_eq!(site.name, "Facebook.com");
        assert_eq!(site.blocked_count, 0);
    }

    #[test]
    fn add_rejects_duplicate_normalized_hosts() {
        let mut list = BlockList::default();
        list.add("facebook.com").unwrap();
        let err = list.add("https://www.facebook.com/feed").unwrap_err();
        assert!(matches!(err, ValidationError::AlreadyBlocked(_)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_drops_only_matching_id() {
        let mut list = BlockList::default();
        list.add("a.com").unwrap();
        let id = list.sites()[0].id;
        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
    }

    #[test]
    fn export_import_roundtrip() {
        let mut list = BlockList::default();
        list.add("facebook.com").unwrap();
        list.add("reddit.com").unwrap();
        let json = list.export_json().unwrap();

        let mut restored = BlockList::default();
        assert_eq!(restored.import_json(&json).unwrap(), 2);
        assert_eq!(restored.sites(), list.sites());
    }

    #[test]
    fn import_rejects_malformed_json_without_mutating() {
        let mut list = BlockList::default();
        list.add("a.com").unwrap();
        assert!(list.import_json("{not json").is_err());
        assert_eq!(list.len(), 1);
    }
}
