//! Reflog line parsing and commit-message path extraction.
//!
//! Lines look like
//! `<old> <new> Name <email> <timestamp> <tz>\tcommit: message`
//! with the message after the tab (or the space) following the timezone.

use std::sync::LazyLock;

use regex::Regex;

/// One parsed reflog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflogEntry {
    pub timestamp: i64,
    pub message: String,
}

static REFLOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{4,40}\s+[0-9a-f]{4,40}\s+.*?\s(\d{9,11})\s([+-]\d{4})[\t ](.*)$")
        .expect("valid reflog-line regex")
});

/// Known source-directory prefixes for message path tokens.
const KNOWN_PREFIXES: &str = "src|app|cmd|internal|ui|frontend|backend|lib|pkg|test|tests";

/// Bare-filename extensions accepted from commit messages.
const KNOWN_EXTENSIONS: &str =
    "go|ts|tsx|js|jsx|mjs|cjs|php|py|rs|rb|java|kt|c|h|cpp|hpp|cs|sh|sql|proto|md|yml|yaml|json|toml";

/// Exact names accepted regardless of shape.
const KNOWN_NAMES: &[&str] = &[
    "Dockerfile",
    "docker-compose.yml",
    "Makefile",
    "go.mod",
    "go.sum",
    "package.json",
    "composer.json",
    "Cargo.toml",
    "tsconfig.json",
];

static MESSAGE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:{KNOWN_PREFIXES})/[A-Za-z0-9_./\-]*\.[A-Za-z0-9]+|\b[A-Za-z0-9_\-]+(?:/[A-Za-z0-9_.\-]+)*\.(?:{KNOWN_EXTENSIONS})\b"
    ))
    .expect("valid message-path regex")
});

/// Parse one reflog line; malformed lines yield `None`.
#[must_use]
pub fn parse_reflog_line(line: &str) -> Option<ReflogEntry> {
    let caps = REFLOG_LINE.captures(line)?;
    let timestamp: i64 = caps[1].parse().ok()?;
    Some(ReflogEntry {
        timestamp,
        message: caps[3].to_string(),
    })
}

/// Heuristic path candidates from a commit message, deduplicated.
#[must_use]
pub fn extract_paths(message: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for m in MESSAGE_PATH.find_iter(message) {
        let token = m.as_str();
        if is_candidate(token) && !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    }
    for name in KNOWN_NAMES {
        if message.contains(name) && !out.iter().any(|t| t == name) {
            out.push((*name).to_string());
        }
    }
    out
}

/// Length 2–200, contains `/` or `.`, not URL-like.
fn is_candidate(token: &str) -> bool {
    (2..=200).contains(&token.len())
        && (token.contains('/') || token.contains('.'))
        && !token.contains("://")
        && !token.starts_with("http")
        && !token.starts_with("www.")
}

#[cfg(test)]
#[path = "reflog_tests.rs"]
mod tests;
