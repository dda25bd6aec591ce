//! Path-like token extraction from free-form command text.
//!
//! Used by the scripts and CI extractors. Recall beats precision here: the
//! scorer's capping and penalties absorb false positives.

use std::sync::LazyLock;

use regex::Regex;

/// Top-level directory prefixes a token may start with.
const KNOWN_PREFIXES: &str = "src|app|cmd|internal|ui|frontend|backend|lib|pkg|test|tests";

/// Source extensions a bare filename token may carry.
const KNOWN_EXTENSIONS: &str = "go|ts|tsx|js|jsx|mjs|cjs|php|py|rs|rb|java|kt|c|h|cpp|hpp|cs|sh|sql|proto|graphql|prisma|dart|vue|svelte|yml|yaml|json|toml|md";

static PREFIXED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:{KNOWN_PREFIXES})/[A-Za-z0-9_./\-]*[A-Za-z0-9_\-]"
    ))
    .expect("valid prefixed-path regex")
});

static EXTENSION_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b[A-Za-z0-9_\-]+(?:/[A-Za-z0-9_.\-]+)*\.(?:{KNOWN_EXTENSIONS})\b"
    ))
    .expect("valid extension-path regex")
});

static GLOB_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_./\-]*\*[A-Za-z0-9_./\-\*]*").expect("valid glob-token regex")
});

/// Extract plain path-like tokens from command text, deduplicated, in order
/// of first appearance.
#[must_use]
pub fn extract(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in PREFIXED_PATH
        .find_iter(text)
        .chain(EXTENSION_PATH.find_iter(text))
    {
        let token = m.as_str();
        if is_plausible(token) && !seen.iter().any(|s| s == token) {
            seen.push(token.to_string());
        }
    }
    seen
}

/// Extract glob tokens (containing `*`) that look like path patterns.
#[must_use]
pub fn extract_globs(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in GLOB_TOKEN.find_iter(text) {
        let token = m.as_str();
        if token.contains('/') && is_plausible(token) && !seen.iter().any(|s| s == token) {
            seen.push(token.to_string());
        }
    }
    seen
}

/// Shared plausibility filter for extracted candidates.
#[must_use]
pub fn is_plausible(token: &str) -> bool {
    let len = token.len();
    if !(2..=200).contains(&len) {
        return false;
    }
    if token.chars().any(char::is_whitespace) {
        return false;
    }
    if token.chars().filter(char::is_ascii_alphanumeric).count() < 2 {
        return false;
    }
    !is_url_like(token)
}

#[must_use]
pub fn is_url_like(token: &str) -> bool {
    token.contains("://")
        || token.starts_with("http")
        || token.starts_with("www.")
        || token.starts_with("mailto:")
}
