mod categorize;
mod entropy;
mod ignore_rules;
mod types;

pub use categorize::categorize;
pub use entropy::shannon_entropy;
pub use types::FileRecord;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::error::{ProfilerError, Result};
use crate::path_utils;

/// Options for the workspace walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Also honor `.gitignore` patterns during the walk.
    pub respect_gitignore: bool,
}

/// Ignore-aware workspace scanner.
///
/// Walks the workspace depth-first, prunes ignored directories (the whole
/// subtree, not just the entry), applies the dotfile/suffix/size rules and
/// the binary-entropy probe, and categorizes every surviving file.
///
/// Individual file errors are swallowed; the walk continues. The returned
/// records are sorted by path so every downstream stage sees a
/// deterministic order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan the workspace rooted at `root`.
    ///
    /// # Errors
    /// Returns `WorkspaceUnreadable` when `root` is not a readable directory
    /// and `Cancelled` when the token fires mid-walk.
    pub fn scan(&self, root: &Path, cancel: &CancelToken) -> Result<Vec<FileRecord>> {
        let meta = std::fs::metadata(root).map_err(|e| ProfilerError::WorkspaceUnreadable {
            path: root.to_path_buf(),
            source: e,
        })?;
        if !meta.is_dir() {
            return Err(ProfilerError::WorkspaceUnreadable {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "workspace root is not a directory",
                ),
            });
        }

        let candidates = if self.options.respect_gitignore {
            Self::walk_with_gitignore(root, cancel)?
        } else {
            Self::walk_plain(root, cancel)?
        };

        // Categorization and the entropy probe read file contents, so they
        // run in parallel; the sort afterwards restores determinism.
        let mut records: Vec<FileRecord> = candidates
            .par_iter()
            .filter_map(|(abs, rel, size)| {
                let record = categorize(rel, *size);
                if entropy::is_probably_binary(abs, *size, &record.extension) {
                    None
                } else {
                    Some(record)
                }
            })
            .collect();
        cancel.checkpoint()?;

        records.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(records)
    }

    fn walk_plain(root: &Path, cancel: &CancelToken) -> Result<Vec<(PathBuf, String, u64)>> {
        let walker = walkdir::WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !Self::prune_dir(e.path(), e.file_type().is_dir()));

        let mut out = Vec::new();
        for entry in walker {
            cancel.checkpoint()?;
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            Self::admit(root, entry.path(), &mut out);
        }
        Ok(out)
    }

    fn walk_with_gitignore(
        root: &Path,
        cancel: &CancelToken,
    ) -> Result<Vec<(PathBuf, String, u64)>> {
        let walker = ignore::WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .filter_entry(|e| {
                e.depth() == 0
                    || !Self::prune_dir(e.path(), e.file_type().is_some_and(|ft| ft.is_dir()))
            })
            .build();

        let mut out = Vec::new();
        for entry in walker {
            cancel.checkpoint()?;
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            Self::admit(root, entry.path(), &mut out);
        }
        Ok(out)
    }

    fn prune_dir(path: &Path, is_dir: bool) -> bool {
        is_dir
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(ignore_rules::is_ignored_dir)
    }

    /// Apply the file-level ignore rules; push survivors onto `out`.
    fn admit(root: &Path, abs: &Path, out: &mut Vec<(PathBuf, String, u64)>) {
        let Some(basename) = abs.file_name().and_then(|n| n.to_str()) else {
            return;
        };
        if ignore_rules::is_ignored_file(basename)
            || ignore_rules::is_disallowed_dotfile(basename)
            || ignore_rules::has_ignored_suffix(basename)
        {
            return;
        }
        let Ok(meta) = abs.metadata() else {
            return;
        };
        let size = meta.len();
        if ignore_rules::is_skipped_by_size(basename, size) {
            return;
        }
        let Ok(stripped) = abs.strip_prefix(root) else {
            return;
        };
        let rel = path_utils::normalize(&stripped.to_string_lossy());
        if rel.is_empty() {
            return;
        }
        out.push((abs.to_path_buf(), rel, size));
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
