use super::*;
use crate::cancel::CancelToken;
use crate::scanner::categorize;

use std::fs;

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    records: Vec<FileRecord>,
}

impl Workspace {
    fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut records = Vec::new();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            records.push(categorize(rel, content.len() as u64));
        }
        records.sort_by(|a, b| a.path.cmp(&b.path));
        Self { dir, records }
    }

    fn extract(&self) -> SignalBundle {
        let cancel = CancelToken::new();
        let ctx = ExtractContext::new(self.dir.path(), &self.records, &cancel);
        let mut bundle = SignalBundle::default();
        ManifestsExtractor::new().extract(&ctx, &mut bundle).unwrap();
        bundle
    }
}

#[test]
fn test_language_partitioning() {
    let ws = Workspace::new(&[
        ("src/app.ts", "export {}"),
        ("src/view.tsx", "export {}"),
        ("legacy/old.js", "module.exports = {}"),
        ("main.go", "package main"),
        ("web/index.php", "<?php"),
        ("README.md", "# x"),
    ]);
    let bundle = ws.extract();
    assert_eq!(bundle.ts_files.len(), 3);
    assert_eq!(bundle.go_files, vec!["main.go"]);
    assert_eq!(bundle.php_files, vec!["web/index.php"]);
}

#[test]
fn test_package_json_scripts_and_main() {
    let ws = Workspace::new(&[
        (
            "package.json",
            r#"{
                "main": "server.js",
                "scripts": {"build": "tsc src/main.ts", "test": "jest"},
                "dependencies": {"express": "^4.0.0"}
            }"#,
        ),
        ("server.js", "require('http')"),
        ("src/main.ts", "export {}"),
    ]);
    let bundle = ws.extract();

    let build = bundle.scripts.iter().find(|s| s.name == "build").unwrap();
    assert_eq!(build.source, "npm");
    assert!(build.paths.contains(&"src/main.ts".to_string()));

    let entry = bundle
        .entrypoints
        .iter()
        .find(|e| e.path == "server.js")
        .unwrap();
    assert_eq!(entry.kind, EntryPointKind::Backend);
    assert_eq!(entry.hints, vec!["package-main"]);
}

#[test]
fn test_vite_dev_script_yields_synthetic_entrypoint() {
    let ws = Workspace::new(&[(
        "package.json",
        r#"{"scripts": {"dev": "vite"}, "dependencies": {"vue": "^3"}}"#,
    )]);
    let bundle = ws.extract();
    let entry = bundle
        .entrypoints
        .iter()
        .find(|e| e.hints.contains(&"vite".to_string()))
        .unwrap();
    assert_eq!(entry.path, "src/main.ts");
    assert_eq!(entry.kind, EntryPointKind::Frontend);
}

#[test]
fn test_react_dependency_classifies_frontend() {
    let ws = Workspace::new(&[
        (
            "package.json",
            r#"{"main": "app.js", "dependencies": {"react": "^18"}}"#,
        ),
        ("app.js", "export {}"),
    ]);
    let bundle = ws.extract();
    assert_eq!(bundle.entrypoints[0].kind, EntryPointKind::Frontend);
}

#[test]
fn test_composer_psr4_and_laravel_entrypoints() {
    let ws = Workspace::new(&[
        (
            "composer.json",
            r#"{
                "autoload": {"psr-4": {"App\\": "app/"}},
                "autoload-dev": {"psr-4": {"Tests\\": "tests/"}},
                "scripts": {"lint": ["phpcs", "phpstan"]}
            }"#,
        ),
        ("artisan", "#!/usr/bin/env php"),
        ("public/index.php", "<?php"),
    ]);
    let bundle = ws.extract();

    assert_eq!(bundle.composer_psr.get("App\\").unwrap(), "app");
    assert_eq!(bundle.composer_psr.get("Tests\\").unwrap(), "tests");

    let lint = bundle.scripts.iter().find(|s| s.name == "lint").unwrap();
    assert_eq!(lint.source, "composer");
    assert_eq!(lint.cmd, "phpcs && phpstan");

    let laravel: Vec<_> = bundle
        .entrypoints
        .iter()
        .filter(|e| e.hints.contains(&"laravel".to_string()))
        .collect();
    assert_eq!(laravel.len(), 2);
}

#[test]
fn test_go_mod_entrypoints() {
    let ws = Workspace::new(&[
        ("go.mod", "module acme\n\ngo 1.20\n"),
        ("main.go", "package main\nfunc main(){}"),
        ("cmd/migrate/main.go", "package main"),
    ]);
    let bundle = ws.extract();

    assert_eq!(bundle.go_modules.get("").unwrap(), "acme");

    let main = bundle
        .entrypoints
        .iter()
        .find(|e| e.path == "main.go")
        .unwrap();
    assert_eq!(main.kind, EntryPointKind::Backend);
    assert_eq!(main.hints, vec!["go-main"]);

    let cli = bundle
        .entrypoints
        .iter()
        .find(|e| e.path == "cmd/migrate/main.go")
        .unwrap();
    assert_eq!(cli.kind, EntryPointKind::Cli);
}

#[test]
fn test_first_tsconfig_wins() {
    let ws = Workspace::new(&[
        (
            "tsconfig.json",
            r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@/*": ["src/*"]}}}"#,
        ),
        (
            "web/tsconfig.json",
            r#"{"compilerOptions": {"baseUrl": "other"}}"#,
        ),
    ]);
    let bundle = ws.extract();
    let view = bundle.ts_config.unwrap();
    assert_eq!(view.base_url.as_deref(), Some(""));
    assert_eq!(view.paths.len(), 1);
}

#[test]
fn test_tsconfig_with_comments_parses() {
    let ws = Workspace::new(&[(
        "tsconfig.json",
        "{\n  // mapped roots\n  \"compilerOptions\": {\"baseUrl\": \".\",},\n}",
    )]);
    let bundle = ws.extract();
    assert!(bundle.ts_config.is_some());
}

#[test]
fn test_malformed_manifest_is_skipped() {
    let ws = Workspace::new(&[("package.json", "{nope"), ("main.go", "package main")]);
    let bundle = ws.extract();
    assert!(bundle.scripts.is_empty());
    assert!(bundle.entrypoints.is_empty());
}

#[test]
fn test_wails_manifest_is_entrypoint() {
    let ws = Workspace::new(&[("wails.json", r#"{"name": "app"}"#)]);
    let bundle = ws.extract();
    assert_eq!(bundle.entrypoints[0].path, "wails.json");
    assert_eq!(bundle.entrypoints[0].hints, vec!["wails"]);
}
