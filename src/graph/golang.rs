//! Go import graph.
//!
//! Imports-only parse: the module path comes from `go.mod`, local imports
//! map to directories, and every non-test file in the target directory
//! becomes an edge target. Files sharing a directory get weak bidirectional
//! cohesion edges.

use std::collections::BTreeMap;

use rayon::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::path_utils;

use super::Graph;
use super::builder::BuildContext;

const IMPORT_WEIGHT: f64 = 1.0;
const PACKAGE_COHESION_WEIGHT: f64 = 0.3;

pub struct GoGraphBuilder {
    single_import: Regex,
    quoted_path: Regex,
}

impl Default for GoGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GoGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            single_import: Regex::new(r#"(?m)^\s*import\s+(?:\w+\s+)?"([^"]+)""#)
                .expect("valid single-import regex"),
            quoted_path: Regex::new(r#""([^"]+)""#).expect("valid quoted-path regex"),
        }
    }

    /// Add import and cohesion edges for every Go file in the bundle.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted.
    pub fn build(&self, ctx: &BuildContext<'_>, graph: &mut Graph) -> Result<()> {
        let bundle = ctx.bundle();
        if bundle.go_files.is_empty() {
            return Ok(());
        }
        ctx.checkpoint()?;

        let by_dir = group_by_dir(&bundle.go_files);

        let edges: Vec<(String, String)> = bundle
            .go_files
            .par_iter()
            .flat_map_iter(|file| {
                let mut found = Vec::new();
                let Some((module_dir, module)) = owning_module(bundle, file) else {
                    return found;
                };
                let Some(text) = ctx.read(file) else {
                    return found;
                };
                for import in self.imports(&text) {
                    let Some(target_dir) = local_dir(&module_dir, module, &import) else {
                        continue;
                    };
                    for target in by_dir.get(target_dir.as_str()).into_iter().flatten() {
                        if *target != file && !target.ends_with("_test.go") {
                            found.push((file.clone(), (*target).clone()));
                        }
                    }
                }
                found
            })
            .collect();
        ctx.checkpoint()?;

        for (from, to) in edges {
            graph.add_edge(&from, &to, IMPORT_WEIGHT);
        }

        for files in by_dir.values() {
            for (i, a) in files.iter().enumerate() {
                for b in files.iter().skip(i + 1) {
                    graph.add_edge(a, b, PACKAGE_COHESION_WEIGHT);
                    graph.add_edge(b, a, PACKAGE_COHESION_WEIGHT);
                }
            }
        }
        Ok(())
    }

    /// Import strings from single imports and `import ( ... )` blocks.
    fn imports(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for caps in self.single_import.captures_iter(text) {
            out.push(caps[1].to_string());
        }
        let mut in_block = false;
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with("import (") || trimmed == "import (" {
                in_block = true;
                continue;
            }
            if in_block {
                if trimmed.starts_with(')') {
                    in_block = false;
                    continue;
                }
                if let Some(caps) = self.quoted_path.captures(trimmed) {
                    out.push(caps[1].to_string());
                }
            }
        }
        out
    }
}

fn group_by_dir(files: &[String]) -> BTreeMap<&str, Vec<&String>> {
    let mut by_dir: BTreeMap<&str, Vec<&String>> = BTreeMap::new();
    for file in files {
        by_dir.entry(path_utils::parent(file)).or_default().push(file);
    }
    by_dir
}

/// The module whose directory is the longest prefix of `file`.
fn owning_module<'a>(
    bundle: &'a crate::signals::SignalBundle,
    file: &str,
) -> Option<(String, &'a str)> {
    bundle
        .go_modules
        .iter()
        .filter(|(dir, _)| path_utils::is_under(file, dir))
        .max_by_key(|(dir, _)| dir.len())
        .map(|(dir, module)| (dir.clone(), module.as_str()))
}

/// Translate a module-local import path to a workspace directory.
fn local_dir(module_dir: &str, module: &str, import: &str) -> Option<String> {
    let rest = if import == module {
        ""
    } else {
        import.strip_prefix(module)?.strip_prefix('/')?
    };
    let dir = if module_dir.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        module_dir.to_string()
    } else {
        format!("{module_dir}/{rest}")
    };
    Some(dir)
}

#[cfg(test)]
#[path = "golang_tests.rs"]
mod tests;
