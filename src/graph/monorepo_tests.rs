use super::*;
use crate::scanner::categorize;

fn records(paths: &[&str]) -> Vec<FileRecord> {
    let mut out: Vec<FileRecord> = paths.iter().map(|p| categorize(p, 1)).collect();
    out.sort_by(|a, b| a.path.cmp(&b.path));
    out
}

#[test]
fn test_single_root_package() {
    let files = records(&["package.json", "src/app.ts"]);
    let packages = detect_packages(&files);
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].root, "");
    assert!(!is_monorepo(&packages));
}

#[test]
fn test_sub_packages_detected() {
    let files = records(&[
        "package.json",
        "frontend/package.json",
        "backend/go.mod",
        "frontend/src/app.ts",
    ]);
    let packages = detect_packages(&files);
    assert_eq!(packages.len(), 3);
    assert!(is_monorepo(&packages));
}

#[test]
fn test_no_manifest_no_packages() {
    let files = records(&["src/main.go"]);
    assert!(detect_packages(&files).is_empty());
}

#[test]
fn test_owning_package_longest_prefix_wins() {
    let files = records(&[
        "package.json",
        "apps/web/package.json",
        "apps/web/admin/package.json",
    ]);
    let packages = detect_packages(&files);

    let owner = owning_package(&packages, "apps/web/admin/index.ts").unwrap();
    assert_eq!(owner.root, "apps/web/admin");

    let owner = owning_package(&packages, "apps/web/src/app.ts").unwrap();
    assert_eq!(owner.root, "apps/web");

    let owner = owning_package(&packages, "tools/script.ts").unwrap();
    assert_eq!(owner.root, "");
}

#[test]
fn test_one_manifest_per_directory() {
    let files = records(&["backend/composer.json", "backend/go.mod"]);
    let packages = detect_packages(&files);
    assert_eq!(packages.len(), 1);
    // Sorted file order: composer.json before go.mod.
    assert_eq!(packages[0].manifest, "backend/composer.json");
}

#[test]
fn test_file_outside_all_packages_without_root_manifest() {
    let files = records(&["frontend/package.json"]);
    let packages = detect_packages(&files);
    assert!(owning_package(&packages, "README.md").is_none());
}
