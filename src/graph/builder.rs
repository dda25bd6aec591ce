//! Graph assembly: per-language sub-builders composed over one shared graph,
//! monorepo-aware.

use std::collections::HashSet;
use std::path::Path;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::path_utils;
use crate::scanner::FileRecord;
use crate::signals::SignalBundle;

use super::generic::GenericGraphBuilder;
use super::golang::GoGraphBuilder;
use super::monorepo::{self, Package};
use super::php::PhpGraphBuilder;
use super::ts::TsGraphBuilder;
use super::Graph;

/// Weight of the awareness edge between package manifests in a monorepo.
const CROSS_PACKAGE_WEIGHT: f64 = 0.1;

/// Read-only view of one package (or the whole workspace) during building.
pub struct BuildContext<'a> {
    root: &'a Path,
    bundle: &'a SignalBundle,
    paths: HashSet<&'a str>,
    cancel: &'a CancelToken,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(
        root: &'a Path,
        bundle: &'a SignalBundle,
        paths: HashSet<&'a str>,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            root,
            bundle,
            paths,
            cancel,
        }
    }

    #[must_use]
    pub const fn bundle(&self) -> &'a SignalBundle {
        self.bundle
    }

    /// Membership test against this package's file set.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Read a workspace-relative file, swallowing errors.
    #[must_use]
    pub fn read(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(path)).ok()
    }

    /// Cooperative cancellation check.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted.
    pub fn checkpoint(&self) -> Result<()> {
        self.cancel.checkpoint()
    }
}

/// Builds the global dependency graph.
///
/// Sub-builders run in a fixed order (TS/JS, Go, PHP, then the generic
/// cross-cutting builder) and add edges by accumulation. In a monorepo the
/// language builders run once per package over a bundle filtered to that
/// package's files; the per-package graphs merge, every pair of package
/// manifests gets a light awareness edge, and the generic builder runs once
/// over the global refs.
pub struct GraphBuilder {
    ts: TsGraphBuilder,
    golang: GoGraphBuilder,
    php: PhpGraphBuilder,
    generic: GenericGraphBuilder,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ts: TsGraphBuilder::new(),
            golang: GoGraphBuilder::new(),
            php: PhpGraphBuilder::new(),
            generic: GenericGraphBuilder::new(),
        }
    }

    /// Build and finalize the dependency graph.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted; parse and IO problems
    /// are swallowed per file.
    pub fn build(
        &self,
        root: &Path,
        files: &[FileRecord],
        bundle: &SignalBundle,
        cancel: &CancelToken,
    ) -> Result<Graph> {
        let mut packages = monorepo::detect_packages(files);
        let mut graph = Graph::new();

        if monorepo::is_monorepo(&packages) {
            // Files outside every sub-package still belong to the root
            // package, manifest or not.
            if !packages.iter().any(|p| p.root.is_empty()) {
                packages.push(Package {
                    root: String::new(),
                    manifest: String::new(),
                });
            }
            for package in &packages {
                cancel.checkpoint()?;
                let scoped = filter_bundle(bundle, &packages, package);
                let paths = files
                    .iter()
                    .map(|f| f.path.as_str())
                    .filter(|p| {
                        monorepo::owning_package(&packages, p)
                            .is_some_and(|owner| owner.root == package.root)
                    })
                    .collect();
                let ctx = BuildContext::new(root, &scoped, paths, cancel);
                let mut partial = Graph::new();
                self.build_languages(&ctx, &mut partial)?;
                graph.merge(partial);
            }
            add_cross_package_edges(&mut graph, &packages);
        } else {
            let paths = files.iter().map(|f| f.path.as_str()).collect();
            let ctx = BuildContext::new(root, bundle, paths, cancel);
            self.build_languages(&ctx, &mut graph)?;
        }

        // Cross-cutting refs span packages, so the generic builder always
        // sees the global file set.
        let paths = files.iter().map(|f| f.path.as_str()).collect();
        let ctx = BuildContext::new(root, bundle, paths, cancel);
        self.generic.build(&ctx, &mut graph)?;

        graph.finalize();
        Ok(graph)
    }

    fn build_languages(&self, ctx: &BuildContext<'_>, graph: &mut Graph) -> Result<()> {
        self.ts.build(ctx, graph)?;
        self.golang.build(ctx, graph)?;
        self.php.build(ctx, graph)?;
        Ok(())
    }
}

/// Restrict a bundle's language partitions and module tables to one package.
fn filter_bundle(bundle: &SignalBundle, packages: &[Package], package: &Package) -> SignalBundle {
    let owned = |path: &str| {
        monorepo::owning_package(packages, path).is_some_and(|owner| owner.root == package.root)
    };

    let mut scoped = SignalBundle {
        ts_files: bundle.ts_files.iter().filter(|p| owned(p)).cloned().collect(),
        go_files: bundle.go_files.iter().filter(|p| owned(p)).cloned().collect(),
        php_files: bundle.php_files.iter().filter(|p| owned(p)).cloned().collect(),
        ts_config: bundle.ts_config.clone(),
        composer_classmap_excludes: bundle.composer_classmap_excludes.clone(),
        ..SignalBundle::default()
    };
    for (dir, module) in &bundle.go_modules {
        if owned(&manifest_probe(dir)) {
            scoped.go_modules.insert(dir.clone(), module.clone());
        }
    }
    for (namespace, dir) in &bundle.composer_psr {
        if package.root.is_empty() || path_utils::is_under(dir, &package.root) {
            scoped.composer_psr.insert(namespace.clone(), dir.clone());
        }
    }
    scoped
}

/// A directory stands in for its manifest when deciding package ownership.
fn manifest_probe(dir: &str) -> String {
    if dir.is_empty() {
        "go.mod".to_string()
    } else {
        format!("{dir}/go.mod")
    }
}

fn add_cross_package_edges(graph: &mut Graph, packages: &[Package]) {
    let with_manifest: Vec<&Package> = packages.iter().filter(|p| !p.manifest.is_empty()).collect();
    for (i, left) in with_manifest.iter().enumerate() {
        for right in with_manifest.iter().skip(i + 1) {
            graph.add_edge(&left.manifest, &right.manifest, CROSS_PACKAGE_WEIGHT);
            graph.add_edge(&right.manifest, &left.manifest, CROSS_PACKAGE_WEIGHT);
        }
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
