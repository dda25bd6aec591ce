//! Console output helpers for the CLI layer.
//!
//! The core pipeline never prints; only the binary surfaces warnings and
//! errors, always on stderr.

mod progress;

pub use progress::ScanProgress;

use std::io::{IsTerminal, Write};

/// Prints an error with consistent formatting:
/// `✖ {error_type}: {message}` plus optional `help:` suggestion.
pub fn print_error_full(error_type: &str, message: &str, suggestion: Option<&str>) {
    let mut stderr = std::io::stderr().lock();
    let _ = write_error(&mut stderr, error_type, message, suggestion);
}

/// Prints a warning: `⚠ Warning: {message}` plus optional `help:` line.
pub fn print_warning_full(message: &str, suggestion: Option<&str>) {
    let mut stderr = std::io::stderr().lock();
    let _ = write_warning(&mut stderr, message, suggestion);
}

fn write_error<W: Write>(
    w: &mut W,
    error_type: &str,
    message: &str,
    suggestion: Option<&str>,
) -> std::io::Result<()> {
    if use_colors() {
        writeln!(w, "\x1b[31m✖\x1b[0m {error_type}: {message}")?;
    } else {
        writeln!(w, "✖ {error_type}: {message}")?;
    }
    if let Some(suggestion) = suggestion {
        writeln!(w, "  help: {suggestion}")?;
    }
    Ok(())
}

fn write_warning<W: Write>(w: &mut W, message: &str, suggestion: Option<&str>) -> std::io::Result<()> {
    if use_colors() {
        writeln!(w, "\x1b[33m⚠\x1b[0m Warning: {message}")?;
    } else {
        writeln!(w, "⚠ Warning: {message}")?;
    }
    if let Some(suggestion) = suggestion {
        writeln!(w, "  help: {suggestion}")?;
    }
    Ok(())
}

/// Respect `NO_COLOR` and non-TTY stderr.
fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_format() {
        let mut buf = Vec::new();
        write_error(&mut buf, "IO", "cannot read x", Some("check the path")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("IO: cannot read x"));
        assert!(text.contains("help: check the path"));
    }

    #[test]
    fn test_write_warning_without_suggestion() {
        let mut buf = Vec::new();
        write_warning(&mut buf, "profile is stale", None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Warning: profile is stale"));
        assert!(!text.contains("help:"));
    }
}
