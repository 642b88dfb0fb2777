//! URL matching against the block list.
//!
//! Matching is a deliberately loose, order-independent containment
//! check rather than a domain-exact comparison: a pattern matches when
//! the normalized request URL contains the normalized pattern, or when
//! the pattern contains the request's host segment. Both directions
//! are intentional -- "facebook.com" blocks "facebook.com/feed", and
//! "https://www.facebook.com/home" still blocks a bare
//! "facebook.com" navigation through the host-segment branch.

/// Lowercase and strip one leading scheme and one leading `www.`.
/// Idempotent; does not touch the path.
pub fn normalize_url(input: &str) -> String {
    let s = input.to_lowercase();
    let s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(&s);
    s.strip_prefix("www.").unwrap_or(s).to_string()
}

/// Whether a single pattern matches the request URL.
pub fn pattern_matches(request_url: &str, pattern: &str) -> bool {
    let clean_request = normalize_url(request_url);
    let clean_pattern = normalize_url(pattern);

    let request_host = clean_request.split('/').next().unwrap_or("");
    clean_request.contains(&clean_pattern) || clean_pattern.contains(request_host)
}

/// Whether any pattern in the list matches. An empty list never
/// blocks.
pub fn is_blocked<I, S>(request_url: &str, patterns: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .any(|p| pattern_matches(request_url, p.as_ref()))
}
