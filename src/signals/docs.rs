//! Documentation reference extraction.
//!
//! Pulls path-like tokens out of every doc file: fenced code-block headers,
//! inline code spans, markdown link targets, and plain text. Output keeps
//! multiplicity; the scorer normalizes mention counts.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

use super::types::SignalBundle;
use super::{ExtractContext, SignalExtractor, pathtokens};

/// Extensions that qualify a slash-less token as a path candidate.
const PATH_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".go", ".php", ".py", ".rs", ".rb", ".java",
    ".kt", ".c", ".h", ".cpp", ".hpp", ".cs", ".sh", ".sql", ".proto", ".graphql", ".prisma",
    ".yml", ".yaml", ".json", ".toml", ".md", ".css", ".html", ".vue", ".svelte", ".dart",
];

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid inline-code regex"));

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\(([^)\s]+)\)").expect("valid md-link regex"));

pub struct DocsExtractor;

impl DocsExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for DocsExtractor {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        for record in ctx.files() {
            ctx.checkpoint()?;
            if !record.is_doc {
                continue;
            }
            let Some(text) = ctx.read(&record.path) else {
                continue;
            };
            scan_doc(&text, &mut bundle.doc_refs);
        }
        Ok(())
    }
}

fn scan_doc(text: &str, refs: &mut Vec<String>) {
    for line in text.lines() {
        if let Some(header) = line.trim_start().strip_prefix("```") {
            for token in header.split([' ', '=', ':']) {
                push_candidate(token, refs);
            }
            continue;
        }

        for caps in MARKDOWN_LINK.captures_iter(line) {
            let target = caps[1].trim_start_matches("./");
            let target = target.split('#').next().unwrap_or(target);
            push_candidate(target, refs);
        }

        for caps in INLINE_CODE.captures_iter(line) {
            for token in caps[1].split_whitespace() {
                push_candidate(token, refs);
            }
        }

        // Plain-text pass over the line with code spans and link syntax
        // removed, so their tokens are not counted twice.
        let without_code = INLINE_CODE.replace_all(line, " ");
        let without_links = MARKDOWN_LINK.replace_all(&without_code, " ");
        for token in without_links.split_whitespace() {
            push_candidate(token.trim_matches(trim_punct), refs);
        }
    }
}

const fn trim_punct(c: char) -> bool {
    matches!(
        c,
        ',' | '.' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' | '"' | '\''
            | '`' | '*' | '!'
    )
}

fn push_candidate(token: &str, refs: &mut Vec<String>) {
    if is_path_candidate(token) {
        refs.push(token.trim_start_matches("./").to_string());
    }
}

/// Candidate filter: slash or allowlisted extension, sane length, no
/// whitespace, at least two alphanumerics, not URL-like.
fn is_path_candidate(token: &str) -> bool {
    if !pathtokens::is_plausible(token) {
        return false;
    }
    if token.contains('#') || token.ends_with('/') || token.ends_with('.') {
        return false;
    }
    let has_slash = token.contains('/');
    let has_known_extension = PATH_EXTENSIONS.iter().any(|e| token.ends_with(e));
    has_slash || has_known_extension
}

#[cfg(test)]
#[path = "docs_tests.rs"]
mod tests;
