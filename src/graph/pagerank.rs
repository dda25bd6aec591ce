//! Weighted PageRank over the finalized file graph.

use std::collections::BTreeMap;

use super::Graph;

const DAMPING: f64 = 0.85;
const EPSILON: f64 = 1e-6;
const MAX_ITERATIONS: usize = 50;

/// Centrality scores normalized so the top vertex is 1.0, plus the number
/// of iterations performed (telemetry).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRankResult {
    pub scores: BTreeMap<String, f64>,
    pub iterations: usize,
}

/// Weighted power iteration.
///
/// Vertices iterate in lexicographic order, which together with the ordered
/// score map makes the result deterministic. Dangling vertices spread their
/// damped mass uniformly.
#[must_use]
pub fn pagerank(graph: &Graph) -> PageRankResult {
    let vertices: Vec<&str> = graph.vertices().collect();
    let n = vertices.len();
    if n == 0 {
        return PageRankResult::default();
    }

    #[allow(clippy::cast_precision_loss)]
    let n_f = n as f64;
    let initial = 1.0 / n_f;
    let mut scores: BTreeMap<&str, f64> = vertices.iter().map(|v| (*v, initial)).collect();
    let out_weight: BTreeMap<&str, f64> = vertices
        .iter()
        .map(|v| (*v, graph.out_edges(v).map(|(_, w)| w).sum::<f64>()))
        .collect();

    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        iterations += 1;

        let mut next: BTreeMap<&str, f64> =
            vertices.iter().map(|v| (*v, (1.0 - DAMPING) / n_f)).collect();

        for from in &vertices {
            let rank = scores[from];
            let total = out_weight[from];
            if total > 0.0 {
                for (to, weight) in graph.out_edges(from) {
                    if let Some(slot) = next.get_mut(to) {
                        *slot += DAMPING * rank * weight / total;
                    }
                }
            } else {
                // Dangling vertex: its mass goes everywhere equally.
                let share = DAMPING * rank / n_f;
                for slot in next.values_mut() {
                    *slot += share;
                }
            }
        }

        let converged = vertices
            .iter()
            .all(|v| (next[v] - scores[v]).abs() <= EPSILON);
        scores = next;
        if converged {
            break;
        }
    }

    let max = scores.values().copied().fold(f64::MIN, f64::max);
    let scores = scores
        .into_iter()
        .map(|(v, s)| (v.to_string(), if max > 0.0 { s / max } else { 0.0 }))
        .collect();

    PageRankResult { scores, iterations }
}

#[cfg(test)]
#[path = "pagerank_tests.rs"]
mod tests;
