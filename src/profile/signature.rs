//! Input signature for staleness detection.
//!
//! Hashes a fixed set of canonical manifests at the workspace root. A
//! changed hash (or a newer mtime) means the persisted profile no longer
//! describes the workspace.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Canonical manifest names tracked at the workspace root.
pub const TRACKED_MANIFESTS: &[&str] = &[
    "package.json",
    "composer.json",
    "go.mod",
    "go.sum",
    "Cargo.toml",
    "Cargo.lock",
    "pyproject.toml",
    "requirements.txt",
    "Makefile",
    "Dockerfile",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InputSignature {
    pub manifest_hashes: BTreeMap<String, String>,
    pub tsconfig_hash: String,
    pub readme_hash: String,
    pub mtime_max: i64,
}

/// Compute the signature over the tracked root files.
///
/// Missing files simply do not contribute; IO errors are treated as
/// absence.
#[must_use]
pub fn compute_signature(root: &Path) -> InputSignature {
    let mut signature = InputSignature::default();

    for name in TRACKED_MANIFESTS {
        let path = root.join(name);
        if let Some(hash) = hash_file(&path) {
            signature.manifest_hashes.insert((*name).to_string(), hash);
            signature.mtime_max = signature.mtime_max.max(mtime_unix(&path));
        }
    }

    if let Some(name) = first_root_tsconfig(root) {
        let path = root.join(&name);
        if let Some(hash) = hash_file(&path) {
            signature.tsconfig_hash = hash;
            signature.mtime_max = signature.mtime_max.max(mtime_unix(&path));
        }
    }

    for name in ["README.md", "readme.md"] {
        let path = root.join(name);
        if let Some(hash) = hash_file(&path) {
            signature.readme_hash = hash;
            signature.mtime_max = signature.mtime_max.max(mtime_unix(&path));
            break;
        }
    }

    signature
}

fn first_root_tsconfig(root: &Path) -> Option<String> {
    let mut names: Vec<String> = std::fs::read_dir(root)
        .ok()?
        .filter_map(std::result::Result::ok)
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| n.starts_with("tsconfig") && n.ends_with(".json"))
        .collect();
    names.sort();
    names.into_iter().next()
}

fn hash_file(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Some(format!("{:x}", hasher.finalize()))
}

fn mtime_unix(path: &Path) -> i64 {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
