//! Typed view over `tsconfig.json` compiler options.
//!
//! Only `compilerOptions.baseUrl` and `compilerOptions.paths` matter to the
//! import graph. The pattern list keeps declaration order: resolution tries
//! patterns in the order they were written, exact patterns before wildcards.

use crate::path_utils;

/// One `paths` mapping: a pattern (possibly containing a single `*`) and its
/// replacement candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pub pattern: String,
    pub mappings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsConfigView {
    /// `compilerOptions.baseUrl`, workspace-relative, normalized.
    pub base_url: Option<String>,
    /// `compilerOptions.paths` in declaration order.
    pub paths: Vec<PathPattern>,
}

impl TsConfigView {
    /// Build the view from a leniently-parsed tsconfig document.
    ///
    /// `config_dir` is the directory containing the tsconfig file; `baseUrl`
    /// and path mappings resolve relative to it.
    #[must_use]
    pub fn from_json(value: &serde_json::Value, config_dir: &str) -> Self {
        let options = &value["compilerOptions"];

        let base_url = options["baseUrl"].as_str().map(|b| join(config_dir, b));

        let mut paths = Vec::new();
        if let Some(map) = options["paths"].as_object() {
            for (pattern, targets) in map {
                let mappings = targets
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|t| t.as_str())
                            .map(|t| join(config_dir, t))
                            .collect()
                    })
                    .unwrap_or_default();
                paths.push(PathPattern {
                    pattern: pattern.clone(),
                    mappings,
                });
            }
        }

        Self { base_url, paths }
    }

    /// Expand `specifier` through the path mappings, in declaration order
    /// with exact patterns tried before wildcard patterns.
    ///
    /// Returns candidate base paths (unprobed; the caller checks existence).
    #[must_use]
    pub fn expand(&self, specifier: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        for entry in self.paths.iter().filter(|p| !p.pattern.contains('*')) {
            if entry.pattern == specifier {
                candidates.extend(entry.mappings.iter().cloned());
            }
        }
        for entry in self.paths.iter().filter(|p| p.pattern.contains('*')) {
            if let Some((prefix, suffix)) = entry.pattern.split_once('*')
                && specifier.len() >= prefix.len() + suffix.len()
                && specifier.starts_with(prefix)
                && specifier.ends_with(suffix)
            {
                let star = &specifier[prefix.len()..specifier.len() - suffix.len()];
                for mapping in &entry.mappings {
                    candidates.push(mapping.replacen('*', star, 1));
                }
            }
        }
        candidates
    }

    /// Candidate for plain `baseUrl` resolution, if a base URL is declared.
    #[must_use]
    pub fn base_candidate(&self, specifier: &str) -> Option<String> {
        self.base_url.as_ref().map(|b| join(b, specifier))
    }
}

fn join(dir: &str, rel: &str) -> String {
    if dir.is_empty() || dir == "." {
        path_utils::normalize(rel)
    } else {
        path_utils::normalize(&format!("{dir}/{rel}"))
    }
}
