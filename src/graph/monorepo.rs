//! Monorepo detection and file-to-package attribution.

use crate::path_utils;
use crate::scanner::FileRecord;

/// Manifest basenames that mark a package root.
const PACKAGE_MANIFESTS: &[&str] = &["package.json", "go.mod", "composer.json"];

/// One detected package. `root` is `""` for the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub root: String,
    pub manifest: String,
}

/// Detect packages by manifest locations.
///
/// Sub-packages are manifests in subdirectories; a root manifest yields the
/// root package. At most one package per directory (the first manifest in
/// sorted file order wins).
#[must_use]
pub fn detect_packages(files: &[FileRecord]) -> Vec<Package> {
    let mut packages: Vec<Package> = Vec::new();
    for record in files {
        if !PACKAGE_MANIFESTS.contains(&record.basename.as_str()) {
            continue;
        }
        let root = path_utils::parent(&record.path).to_string();
        if !packages.iter().any(|p| p.root == root) {
            packages.push(Package {
                root,
                manifest: record.path.clone(),
            });
        }
    }
    packages
}

/// True when any sub-package (manifest outside the workspace root) exists.
#[must_use]
pub fn is_monorepo(packages: &[Package]) -> bool {
    packages.iter().any(|p| !p.root.is_empty())
}

/// The package a file belongs to: the longest package root prefixing its
/// path. Files outside every sub-package belong to the root package (`""`).
#[must_use]
pub fn owning_package<'a>(packages: &'a [Package], path: &str) -> Option<&'a Package> {
    packages
        .iter()
        .filter(|p| path_utils::is_under(path, &p.root))
        .max_by_key(|p| p.root.len())
}

#[cfg(test)]
#[path = "monorepo_tests.rs"]
mod tests;
