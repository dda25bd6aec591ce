use super::*;
use crate::cancel::CancelToken;
use crate::signals::SignalBundle;

use std::collections::HashSet;
use std::path::Path;

fn build(bundle: &SignalBundle, existing: &[&str]) -> Graph {
    let cancel = CancelToken::new();
    let paths: HashSet<&str> = existing.iter().copied().collect();
    let ctx = BuildContext::new(Path::new("/nonexistent"), bundle, paths, &cancel);
    let mut graph = Graph::new();
    GenericGraphBuilder::new().build(&ctx, &mut graph).unwrap();
    graph
}

#[test]
fn test_script_refs_create_virtual_edges() {
    let mut bundle = SignalBundle::default();
    bundle.add_script_refs("build", vec!["src/main.ts".to_string()]);
    let graph = build(&bundle, &["src/main.ts"]);
    assert!((graph.edge_weight("__script:build", "src/main.ts").unwrap() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_ci_refs_create_virtual_edges() {
    let mut bundle = SignalBundle::default();
    bundle.add_ci_refs("deploy", vec!["cmd/server/main.go".to_string()]);
    let graph = build(&bundle, &["cmd/server/main.go"]);
    assert!(graph.edge_weight("__ci:deploy", "cmd/server/main.go").is_some());
}

#[test]
fn test_doc_mentions_become_intrinsic_self_loops() {
    let mut bundle = SignalBundle::default();
    bundle.doc_refs.push("src/core.ts".to_string());
    let graph = build(&bundle, &["src/core.ts"]);
    let weight = graph.edge_weight("src/core.ts", "src/core.ts").unwrap();
    assert!(weight > 1.0);
}

#[test]
fn test_repeated_doc_mentions_accumulate() {
    let mut bundle = SignalBundle::default();
    bundle.doc_refs.push("a.go".to_string());
    bundle.doc_refs.push("a.go".to_string());
    let graph = build(&bundle, &["a.go"]);
    let weight = graph.edge_weight("a.go", "a.go").unwrap();
    assert!((weight - 2.0 * INTRINSIC_LOOP_WEIGHT).abs() < f64::EPSILON);
}

#[test]
fn test_unscanned_paths_dropped() {
    let mut bundle = SignalBundle::default();
    bundle.add_script_refs("build", vec!["ghost.ts".to_string()]);
    bundle.doc_refs.push("phantom.md".to_string());
    let graph = build(&bundle, &[]);
    assert_eq!(graph.vertex_count(), 0);
}

#[test]
fn test_survives_finalize_as_marker() {
    let mut bundle = SignalBundle::default();
    bundle.doc_refs.push("key.go".to_string());
    let mut graph = build(&bundle, &["key.go"]);
    graph.finalize();
    assert!(graph.edge_weight("key.go", "key.go").is_some());
}
