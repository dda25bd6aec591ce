use super::*;
use crate::graph::Graph;

#[test]
fn test_empty_graph() {
    let result = pagerank(&Graph::new());
    assert!(result.scores.is_empty());
    assert_eq!(result.iterations, 0);
}

#[test]
fn test_single_vertex() {
    let mut graph = Graph::new();
    graph.add_vertex("only.go");
    let result = pagerank(&graph);
    assert_eq!(result.scores.len(), 1);
    assert!((result.scores["only.go"] - 1.0).abs() < f64::EPSILON);
    assert!(result.iterations >= 1);
}

#[test]
fn test_single_vertex_with_self_loop() {
    let mut graph = Graph::new();
    graph.add_edge("v", "v", 2.0);
    let result = pagerank(&graph);
    assert!((result.scores["v"] - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_max_is_normalized_to_one() {
    let mut graph = Graph::new();
    graph.add_edge("a", "hub", 1.0);
    graph.add_edge("b", "hub", 1.0);
    graph.add_edge("c", "hub", 1.0);
    let result = pagerank(&graph);
    let max = result.scores.values().copied().fold(f64::MIN, f64::max);
    assert!((max - 1.0).abs() < 1e-12);
    assert!((result.scores["hub"] - 1.0).abs() < 1e-12);
}

#[test]
fn test_incoming_edges_raise_rank() {
    let mut graph = Graph::new();
    graph.add_edge("a", "central", 1.0);
    graph.add_edge("b", "central", 1.0);
    graph.add_edge("a", "side", 0.1);
    let result = pagerank(&graph);
    assert!(result.scores["central"] > result.scores["side"]);
}

#[test]
fn test_weights_split_contributions() {
    let mut graph = Graph::new();
    graph.add_edge("src", "heavy", 9.0);
    graph.add_edge("src", "light", 1.0);
    let result = pagerank(&graph);
    assert!(result.scores["heavy"] > result.scores["light"]);
}

#[test]
fn test_all_scores_in_unit_interval() {
    let mut graph = Graph::new();
    for i in 0..20 {
        graph.add_edge(&format!("f{i}.go"), &format!("f{}.go", (i + 1) % 20), 1.0);
        graph.add_edge(&format!("f{i}.go"), "hub.go", 0.5);
    }
    let result = pagerank(&graph);
    for score in result.scores.values() {
        assert!((0.0..=1.0).contains(score));
    }
}

#[test]
fn test_deterministic_across_runs() {
    let mut graph = Graph::new();
    graph.add_edge("x", "y", 1.0);
    graph.add_edge("y", "z", 2.0);
    graph.add_edge("z", "x", 0.5);
    let first = pagerank(&graph);
    let second = pagerank(&graph);
    assert_eq!(first, second);
}

#[test]
fn test_iteration_cap_respected() {
    let mut graph = Graph::new();
    for i in 0..10 {
        for j in 0..10 {
            if i != j {
                graph.add_edge(&format!("n{i}"), &format!("n{j}"), 1.0);
            }
        }
    }
    let result = pagerank(&graph);
    assert!(result.iterations <= 50);
}
