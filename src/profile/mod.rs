mod signature;

pub use signature::{InputSignature, TRACKED_MANIFESTS, compute_signature};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProfilerError, Result};
use crate::gitstats::GitMode;
use crate::scorer::{Heuristics, ImportantFile};
use crate::signals::{CiConfig, CodegenSpec, ConfigFile, EntryPoint, RouteOrService, Script};

/// Current profile schema version. Readers must treat any other value as a
/// distinguishable incompatibility, never as absence.
pub const PROFILE_VERSION: &str = "2";

/// Serialized git-stats summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStatsInfo {
    pub mode: GitMode,
    pub window_days: u32,
}

/// Run telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Metrics {
    pub files: usize,
    pub edges: usize,
    pub pagerank_iters: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_churn: Option<f64>,
}

/// The emitted aggregate. Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub workspace_root: String,
    pub created_at_unix: i64,
    pub languages: Vec<String>,
    pub entrypoints: Vec<EntryPoint>,
    pub scripts: Vec<Script>,
    pub ci: Vec<CiConfig>,
    pub configs: Vec<ConfigFile>,
    pub codegen: Vec<CodegenSpec>,
    pub routes_services: Vec<RouteOrService>,
    pub important_files: Vec<ImportantFile>,
    pub heuristics: Heuristics,
    pub gitstats: GitStatsInfo,
    /// Deprecated duplicate of `gitstats.window_days`; written for older
    /// readers, ignored on read.
    pub git_window_days: u32,
    pub input_signature: InputSignature,
    pub metrics: Metrics,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub manual_boosts: BTreeMap<String, f64>,
    pub version: String,
}

impl Profile {
    /// Load a persisted profile, enforcing the version check.
    ///
    /// # Errors
    /// - `Io` when the file is missing or unreadable (absence),
    /// - `VersionIncompatible` when the schema version differs (recompute),
    /// - `JsonSerialize` when the document is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ProfilerError::io_with_context(e, path.to_path_buf(), "read profile"))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;

        let found = value["version"].as_str().unwrap_or_default().to_string();
        if found != PROFILE_VERSION {
            return Err(ProfilerError::VersionIncompatible {
                found,
                expected: PROFILE_VERSION.to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The top-`n` ranked paths, for churn comparison and the hotlist.
    #[must_use]
    pub fn top_paths(&self, n: usize) -> Vec<&str> {
        self.important_files
            .iter()
            .take(n)
            .map(|f| f.path.as_str())
            .collect()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
