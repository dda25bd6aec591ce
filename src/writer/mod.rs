//! Atomic artifact emission under `<workspace>/.loom/`.
//!
//! Every write goes through write-to-tempfile-then-rename so readers never
//! observe partial data. Concurrent writers race on the rename, but each
//! one renames a complete artifact.

mod rules;

pub use rules::render_rules;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{ProfilerError, Result};
use crate::profile::{Profile, TRACKED_MANIFESTS};

/// Directory holding the persisted artifacts, relative to the workspace.
pub const STATE_DIR: &str = ".loom";

pub const PROFILE_FILENAME: &str = "project_profile.json";
pub const HOTLIST_FILENAME: &str = "hotlist.txt";
pub const RULES_FILENAME: &str = "rules.md";
/// User-owned optional input, read by the orchestrator.
pub const MANUAL_BOOSTS_FILENAME: &str = "manual_boosts.json";

/// Number of paths emitted into the hotlist.
const HOTLIST_LIMIT: usize = 50;

#[must_use]
pub fn state_dir(workspace: &Path) -> PathBuf {
    workspace.join(STATE_DIR)
}

#[must_use]
pub fn profile_path(workspace: &Path) -> PathBuf {
    state_dir(workspace).join(PROFILE_FILENAME)
}

#[must_use]
pub fn manual_boosts_path(workspace: &Path) -> PathBuf {
    state_dir(workspace).join(MANUAL_BOOSTS_FILENAME)
}

/// Write all three artifacts atomically.
///
/// # Errors
/// Surfaces IO failures to the caller (retryable); serialization failures
/// indicate a programmer error upstream.
pub fn write_artifacts(workspace: &Path, profile: &Profile) -> Result<()> {
    let dir = state_dir(workspace);
    fs::create_dir_all(&dir)
        .map_err(|e| ProfilerError::io_with_context(e, dir.clone(), "create state directory"))?;

    let mut json = serde_json::to_string_pretty(profile)?;
    json.push('\n');
    atomic_write(&dir.join(PROFILE_FILENAME), json.as_bytes())?;

    atomic_write(
        &dir.join(HOTLIST_FILENAME),
        render_hotlist(profile).as_bytes(),
    )?;
    atomic_write(&dir.join(RULES_FILENAME), render_rules(profile).as_bytes())?;
    Ok(())
}

/// Flat newline-separated ranked paths with a `#`-comment header.
#[must_use]
pub fn render_hotlist(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str("# Ranked important files (top ");
    out.push_str(&HOTLIST_LIMIT.to_string());
    out.push_str(")\n");
    out.push_str("# Regenerated on every profile run; do not edit.\n");
    for path in profile.top_paths(HOTLIST_LIMIT) {
        out.push_str(path);
        out.push('\n');
    }
    out
}

/// True when any tracked root manifest is newer than the persisted profile.
/// A missing profile is stale by definition.
#[must_use]
pub fn is_stale(workspace: &Path) -> bool {
    let Some(profile_mtime) = mtime(&profile_path(workspace)) else {
        return true;
    };
    TRACKED_MANIFESTS
        .iter()
        .filter_map(|name| mtime(&workspace.join(name)))
        .any(|manifest_mtime| manifest_mtime > profile_mtime)
}

fn mtime(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}

/// RAII guard for temporary file cleanup.
///
/// Ensures the temp file is removed if the write fails before the rename.
#[derive(Debug)]
struct TempFileGuard<'a> {
    path: &'a Path,
    should_remove: bool,
}

impl<'a> TempFileGuard<'a> {
    const fn new(path: &'a Path) -> Self {
        Self {
            path,
            should_remove: true,
        }
    }

    /// Mark the temp file as committed (don't remove on drop).
    const fn commit(&mut self) {
        self.should_remove = false;
    }
}

impl Drop for TempFileGuard<'_> {
    fn drop(&mut self) {
        if self.should_remove {
            let _ = fs::remove_file(self.path);
        }
    }
}

/// Atomic write: temp file in the same directory, flush, sync, rename.
///
/// # Errors
/// Returns an IO error with operation context when any step fails; the
/// original file is preserved on failure.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_stem = path.file_name().and_then(|n| n.to_str()).unwrap_or("file");
    let temp_name = format!(".{file_stem}.tmp.{}", std::process::id());
    let temp_path = parent.join(&temp_name);

    let mut temp_guard = TempFileGuard::new(&temp_path);

    {
        let temp_file = File::create(&temp_path).map_err(|e| {
            ProfilerError::io_with_context(e, temp_path.clone(), "create temp file")
        })?;
        let mut writer = io::BufWriter::new(&temp_file);
        writer
            .write_all(content)
            .map_err(|e| ProfilerError::io_with_context(e, temp_path.clone(), "write temp file"))?;
        writer
            .flush()
            .map_err(|e| ProfilerError::io_with_context(e, temp_path.clone(), "flush temp file"))?;
        temp_file
            .sync_all()
            .map_err(|e| ProfilerError::io_with_context(e, temp_path.clone(), "sync temp file"))?;
    }

    fs::rename(&temp_path, path)
        .map_err(|e| ProfilerError::io_with_context(e, path.to_path_buf(), "rename"))?;
    temp_guard.commit();
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
