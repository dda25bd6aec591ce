use super::*;
use crate::cancel::CancelToken;
use crate::signals::{SignalBundle, TsConfigView};

use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    bundle: SignalBundle,
}

impl Fixture {
    fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut bundle = SignalBundle::default();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            bundle.ts_files.push((*rel).to_string());
        }
        bundle.ts_files.sort();
        Self { dir, bundle }
    }

    fn with_tsconfig(mut self, json: &str) -> Self {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        self.bundle.ts_config = Some(TsConfigView::from_json(&value, ""));
        self
    }

    fn build(&self) -> Graph {
        let cancel = CancelToken::new();
        let paths: HashSet<&str> = self.bundle.ts_files.iter().map(String::as_str).collect();
        let ctx = BuildContext::new(self.dir.path(), &self.bundle, paths, &cancel);
        let mut graph = Graph::new();
        TsGraphBuilder::new().build(&ctx, &mut graph).unwrap();
        graph
    }
}

#[test]
fn test_relative_import() {
    let fixture = Fixture::new(&[
        ("src/main.ts", "import { x } from './util'\n"),
        ("src/util.ts", "export const x = 1\n"),
    ]);
    let graph = fixture.build();
    assert!(
        (graph.edge_weight("src/main.ts", "src/util.ts").unwrap() - 1.0).abs() < f64::EPSILON
    );
}

#[test]
fn test_parent_relative_import() {
    let fixture = Fixture::new(&[
        ("src/app/main.ts", "import cfg from '../config'\n"),
        ("src/config.ts", "export default {}\n"),
    ]);
    let graph = fixture.build();
    assert!(graph.edge_weight("src/app/main.ts", "src/config.ts").is_some());
}

#[test]
fn test_index_resolution() {
    let fixture = Fixture::new(&[
        ("src/main.ts", "import * as lib from './lib'\n"),
        ("src/lib/index.ts", "export {}\n"),
    ]);
    let graph = fixture.build();
    assert!(graph.edge_weight("src/main.ts", "src/lib/index.ts").is_some());
}

#[test]
fn test_tsconfig_paths_mapping() {
    let fixture = Fixture::new(&[
        ("src/main.ts", "import { x } from \"@/util\"\n"),
        ("src/util.ts", "export const x = 1\n"),
    ])
    .with_tsconfig(r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@/*": ["src/*"]}}}"#);
    let graph = fixture.build();
    assert!(
        (graph.edge_weight("src/main.ts", "src/util.ts").unwrap() - 1.0).abs() < f64::EPSILON,
        "edges: {:?}",
        graph.all_edges().collect::<Vec<_>>()
    );
}

#[test]
fn test_base_url_resolution() {
    let fixture = Fixture::new(&[
        ("src/main.ts", "import { helper } from 'helpers/fmt'\n"),
        ("helpers/fmt.ts", "export const helper = 1\n"),
    ])
    .with_tsconfig(r#"{"compilerOptions": {"baseUrl": "."}}"#);
    let graph = fixture.build();
    assert!(graph.edge_weight("src/main.ts", "helpers/fmt.ts").is_some());
}

#[test]
fn test_external_imports_dropped() {
    let fixture = Fixture::new(&[(
        "src/main.ts",
        "import React from 'react'\nimport fs from 'node:fs'\n",
    )]);
    let graph = fixture.build();
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_require_and_dynamic_import() {
    let fixture = Fixture::new(&[
        (
            "src/main.js",
            "const a = require('./a')\nconst b = import('./b')\n",
        ),
        ("src/a.js", "module.exports = 1\n"),
        ("src/b.js", "export default 2\n"),
    ]);
    let graph = fixture.build();
    assert!(graph.edge_weight("src/main.js", "src/a.js").is_some());
    assert!(graph.edge_weight("src/main.js", "src/b.js").is_some());
}

#[test]
fn test_export_from() {
    let fixture = Fixture::new(&[
        ("src/index.ts", "export { x } from './impl'\n"),
        ("src/impl.ts", "export const x = 1\n"),
    ]);
    let graph = fixture.build();
    assert!(graph.edge_weight("src/index.ts", "src/impl.ts").is_some());
}

#[test]
fn test_commented_imports_ignored() {
    let fixture = Fixture::new(&[
        (
            "src/main.ts",
            "// import { x } from './dead'\n/* import y from './gone' */\nexport {}\n",
        ),
        ("src/dead.ts", "export const x = 1\n"),
        ("src/gone.ts", "export default 1\n"),
    ]);
    let graph = fixture.build();
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_duplicate_imports_accumulate() {
    let fixture = Fixture::new(&[
        (
            "src/main.ts",
            "import { a } from './util'\nimport { b } from './util'\n",
        ),
        ("src/util.ts", "export const a = 1, b = 2\n"),
    ]);
    let graph = fixture.build();
    assert!((graph.edge_weight("src/main.ts", "src/util.ts").unwrap() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_strip_js_comments_preserves_strings() {
    let out = strip_js_comments("const url = \"http://x\"; // trailing\nconst b = 1;");
    assert!(out.contains("http://x"));
    assert!(!out.contains("trailing"));
}
