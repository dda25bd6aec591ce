mod reflog;

pub use reflog::parse_reflog_line;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::error::Result;

/// Default activity horizon in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 730;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GitMode {
    #[default]
    None,
    Reflog,
    Touchlog,
}

/// Per-file activity signals in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GitStats {
    pub recency: BTreeMap<String, f64>,
    pub frequency: BTreeMap<String, f64>,
    pub mode: GitMode,
    pub window_days: u32,
}

impl GitStats {
    #[must_use]
    pub fn none(window_days: u32) -> Self {
        Self {
            window_days,
            ..Self::default()
        }
    }
}

/// Zero-exec activity extraction.
///
/// No subprocess is ever spawned: the version-control directory is located
/// at the workspace root (gitfile indirection resolved through `gix`) and
/// the reflog is read as line-oriented text. A missing or unreadable
/// repository yields `{mode: none}`.
///
/// # Errors
/// Returns `Cancelled` when the run is aborted.
pub fn extract(root: &Path, window_days: u32, cancel: &CancelToken) -> Result<GitStats> {
    cancel.checkpoint()?;

    let Some(git_dir) = locate_git_dir(root) else {
        return Ok(GitStats::none(window_days));
    };

    // The touchlog mode (per-project edit log) is a planned alternative
    // source; it is not populated yet and falls through to the reflog.
    if let Some(stats) = touchlog(&git_dir, window_days) {
        return Ok(stats);
    }

    let now = unix_now();
    let window = i64::from(window_days) * SECONDS_PER_DAY;
    let cutoff = now - window;

    let mut times: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for log in reflog_files(&git_dir) {
        cancel.checkpoint()?;
        let Ok(text) = std::fs::read_to_string(&log) else {
            continue;
        };
        for line in text.lines() {
            let Some(entry) = reflog::parse_reflog_line(line) else {
                continue;
            };
            if entry.timestamp < cutoff || entry.timestamp > now {
                continue;
            }
            for candidate in reflog::extract_paths(&entry.message) {
                times.entry(candidate).or_default().push(entry.timestamp);
            }
        }
    }

    if times.is_empty() {
        return Ok(GitStats::none(window_days));
    }

    let max_count = times.values().map(Vec::len).max().unwrap_or(1).max(1);
    let mut stats = GitStats {
        mode: GitMode::Reflog,
        window_days,
        ..GitStats::default()
    };

    #[allow(clippy::cast_precision_loss)]
    for (path, stamps) in times {
        let last = stamps.iter().copied().max().unwrap_or(cutoff);
        let age = (now - last).max(0) as f64;
        let raw = (1.0 - age / window as f64).max(0.0);
        // Sharpen: recent activity matters non-linearly.
        let recency = 1.0 - (1.0 - raw).powi(2);
        let frequency = stamps.len() as f64 / max_count as f64;
        stats.recency.insert(path.clone(), recency);
        stats.frequency.insert(path, frequency);
    }

    Ok(stats)
}

/// Locate the `.git` directory at the workspace root only.
///
/// Parent directories are intentionally not consulted: activity must belong
/// to the workspace being profiled. `gix` resolves worktree gitfiles.
fn locate_git_dir(root: &Path) -> Option<PathBuf> {
    let dot_git = root.join(".git");
    if !dot_git.exists() {
        return None;
    }
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    // `.git` is a file pointing elsewhere (worktree/submodule).
    let repo = gix::open(root).ok()?;
    Some(repo.path().to_path_buf())
}

/// Placeholder for the per-project edit log. Not populated yet; callers
/// fall through to the reflog.
#[allow(clippy::unnecessary_wraps, unused_variables)]
fn touchlog(git_dir: &Path, window_days: u32) -> Option<GitStats> {
    None
}

fn reflog_files(git_dir: &Path) -> Vec<PathBuf> {
    let mut logs = Vec::new();
    let head = git_dir.join("logs").join("HEAD");
    if head.is_file() {
        logs.push(head);
    }
    let heads = git_dir.join("logs").join("refs").join("heads");
    if let Ok(entries) = std::fs::read_dir(&heads) {
        let mut branches: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .map(|e| e.path())
            .collect();
        branches.sort();
        logs.extend(branches);
    }
    logs
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
