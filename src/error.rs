use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfilerError {
    #[error("Workspace not readable: {path}")]
    WorkspaceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", format_io_error(source, path, operation))]
    Io {
        #[source]
        source: std::io::Error,
        path: Option<PathBuf>,
        operation: Option<&'static str>,
    },

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Profile version {found:?} is not compatible with {expected:?}")]
    VersionIncompatible { found: String, expected: String },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Formats IO error with optional context for display.
/// Uses references to Options as required by thiserror's `#[error(...)]` macro expansion.
#[allow(clippy::ref_option, clippy::ref_option_ref)]
fn format_io_error(
    source: &std::io::Error,
    path: &Option<PathBuf>,
    operation: &Option<&'static str>,
) -> String {
    match (path.as_ref(), *operation) {
        (Some(p), Some(op)) => format!("IO error ({op} '{}'): {source}", p.display()),
        (Some(p), None) => format!("IO error ('{}'): {source}", p.display()),
        (None, Some(op)) => format!("IO error ({op}): {source}"),
        (None, None) => format!("IO error: {source}"),
    }
}

impl From<std::io::Error> for ProfilerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            source: e,
            path: None,
            operation: None,
        }
    }
}

impl ProfilerError {
    /// Creates an IO error with path context.
    #[must_use]
    pub const fn io_with_path(source: std::io::Error, path: PathBuf) -> Self {
        Self::Io {
            source,
            path: Some(path),
            operation: None,
        }
    }

    /// Creates an IO error with path and operation context.
    #[must_use]
    pub const fn io_with_context(
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path),
            operation: Some(operation),
        }
    }

    /// Returns the error type as a short string identifier.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::WorkspaceUnreadable { .. } => "Workspace",
            Self::Io { .. } => "IO",
            Self::JsonSerialize(_) => "JSON",
            Self::VersionIncompatible { .. } => "Version",
            Self::Git(_) => "Git",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns the error message without the type prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::WorkspaceUnreadable { path, source } => {
                format!("{} ({})", path.display(), source.kind())
            }
            Self::Io {
                source,
                path,
                operation,
            } => match (path, operation) {
                (Some(p), Some(op)) => format!("{op} '{}': {source}", p.display()),
                (Some(p), None) => format!("'{}': {source}", p.display()),
                (None, Some(op)) => format!("{op}: {source}"),
                (None, None) => source.to_string(),
            },
            Self::JsonSerialize(e) => e.to_string(),
            Self::VersionIncompatible { found, expected } => {
                format!("found {found:?}, expected {expected:?}")
            }
            Self::Git(msg) => msg.clone(),
            Self::Cancelled => "operation cancelled".to_string(),
        }
    }

    /// Returns an actionable suggestion for resolving the error.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::WorkspaceUnreadable { .. } => {
                Some("Verify the workspace path exists and is a readable directory")
            }
            Self::Io { source, .. } => Self::io_suggestion(source.kind()),
            Self::JsonSerialize(_) => {
                Some("Check for non-serializable data types or malformed structures")
            }
            Self::VersionIncompatible { .. } => {
                Some("Re-run the analysis to regenerate the profile with the current schema")
            }
            Self::Git(_) => Some("The git directory may be corrupt; analysis proceeds without it"),
            Self::Cancelled => None,
        }
    }

    /// True when a persisted profile was written by an incompatible schema version.
    ///
    /// Callers must treat this as "recompute", never as absence.
    #[must_use]
    pub const fn is_version_incompatible(&self) -> bool {
        matches!(self, Self::VersionIncompatible { .. })
    }

    /// Returns a suggestion based on IO error kind.
    const fn io_suggestion(kind: std::io::ErrorKind) -> Option<&'static str> {
        match kind {
            std::io::ErrorKind::NotFound => Some("Verify the file path exists"),
            std::io::ErrorKind::PermissionDenied => {
                Some("Check file permissions or run with appropriate access rights")
            }
            std::io::ErrorKind::InvalidData => {
                Some("The file may be corrupted or in an unexpected format")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfilerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
