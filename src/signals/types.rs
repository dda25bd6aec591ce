//! Structured facts extracted from the workspace.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tsconfig::TsConfigView;

/// Program entry designated by heuristic or manifest declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub path: String,
    pub kind: EntryPointKind,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPointKind {
    Backend,
    Frontend,
    Cli,
    Infra,
}

/// A named command from a manifest, task runner, or shell script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    /// Origin tool: `npm`, `composer`, `pyproject`, `make`, `just`, `task`,
    /// `procfile`, `shell`.
    pub source: String,
    pub cmd: String,
    pub paths: Vec<String>,
}

/// A recognized CI definition file and its job names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiConfig {
    pub path: String,
    pub jobs: Vec<String>,
}

/// A tool-configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub tool: String,
    pub path: String,
}

/// A code-generation tool together with the paths under its control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenSpec {
    pub tool: String,
    pub paths: Vec<String>,
}

/// An HTTP route or a service/controller declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOrService {
    pub kind: RouteKind,
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Route,
    Service,
}

/// Accumulated outputs of signal extraction.
///
/// Extractors run in a fixed order and enrich this bundle; later extractors
/// may depend on fields populated by earlier ones (manifests seed
/// `ts_config`, `composer_psr`, and the language partitions).
#[derive(Debug, Clone, Default)]
pub struct SignalBundle {
    /// TypeScript/JavaScript files (`.ts .tsx .js .jsx .mjs .cjs`).
    pub ts_files: Vec<String>,
    /// Go files.
    pub go_files: Vec<String>,
    /// PHP files.
    pub php_files: Vec<String>,

    /// Typed view of the first `tsconfig*.json` encountered.
    pub ts_config: Option<TsConfigView>,
    /// PSR-4 namespace prefix (trailing separator normalized) → source dir.
    pub composer_psr: IndexMap<String, String>,
    /// `exclude-from-classmap` entries, workspace-relative.
    pub composer_classmap_excludes: Vec<String>,
    /// `go.mod` directory → declared module path.
    pub go_modules: IndexMap<String, String>,

    /// Job name → paths mentioned by that job's commands.
    pub script_refs: IndexMap<String, Vec<String>>,
    /// CI job name → paths mentioned by that job's commands.
    pub ci_refs: IndexMap<String, Vec<String>>,
    /// Paths referenced from documentation, with repetition.
    pub doc_refs: Vec<String>,

    pub entrypoints: Vec<EntryPoint>,
    pub scripts: Vec<Script>,
    pub ci_configs: Vec<CiConfig>,
    pub configs: Vec<ConfigFile>,
    pub codegen: Vec<CodegenSpec>,
    pub routes_services: Vec<RouteOrService>,
}

impl SignalBundle {
    /// Records an entrypoint, ignoring exact duplicates.
    pub fn push_entrypoint(&mut self, entry: EntryPoint) {
        if !self
            .entrypoints
            .iter()
            .any(|e| e.path == entry.path && e.kind == entry.kind)
        {
            self.entrypoints.push(entry);
        }
    }

    /// Appends paths under a job key, deduplicating per job.
    pub fn add_script_refs(&mut self, job: &str, paths: Vec<String>) {
        let entry = self.script_refs.entry(job.to_string()).or_default();
        for p in paths {
            if !entry.contains(&p) {
                entry.push(p);
            }
        }
    }

    /// Appends paths under a CI job key, deduplicating per job.
    pub fn add_ci_refs(&mut self, job: &str, paths: Vec<String>) {
        let entry = self.ci_refs.entry(job.to_string()).or_default();
        for p in paths {
            if !entry.contains(&p) {
                entry.push(p);
            }
        }
    }
}
