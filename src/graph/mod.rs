mod builder;
mod generic;
mod golang;
mod monorepo;
mod pagerank;
mod php;
mod ts;

pub use builder::GraphBuilder;
pub use monorepo::{Package, detect_packages};
pub use pagerank::{PageRankResult, pagerank};

use std::collections::{BTreeMap, BTreeSet};

/// Weighted directed graph over workspace-relative path strings.
///
/// Edge weights accumulate: adding `(u, v, w)` on top of an existing
/// `(u, v, w')` stores `w + w'`. Both endpoints become vertices regardless
/// of the weight's sign; non-positive accumulated weights are dropped at
/// finalize. Ordered storage keeps every iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertices: BTreeSet<String>,
    edges: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Out-degree cap applied at finalize.
pub const MAX_OUT_DEGREE: usize = 500;

/// Upper bound edge weights are clamped to at finalize.
pub const MAX_EDGE_WEIGHT: f64 = 10.0;

/// Self-loop weight marking a vertex as intrinsically important.
///
/// The finalize pass prunes self-loops of weight ≤ 1.0; anything heavier is
/// a deliberate marker left by a builder.
pub const INTRINSIC_LOOP_WEIGHT: f64 = 1.5;

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: &str) {
        if !self.vertices.contains(vertex) {
            self.vertices.insert(vertex.to_string());
        }
    }

    /// Accumulate an edge. Inserts both endpoints as vertices.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        self.add_vertex(from);
        self.add_vertex(to);
        *self
            .edges
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_insert(0.0) += weight;
    }

    #[must_use]
    pub fn contains_vertex(&self, vertex: &str) -> bool {
        self.vertices.contains(vertex)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edges.get(from).and_then(|m| m.get(to)).copied()
    }

    /// Vertices in lexicographic order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(String::as_str)
    }

    /// Outbound edges of `from` in target order.
    pub fn out_edges(&self, from: &str) -> impl Iterator<Item = (&str, f64)> {
        self.edges
            .get(from)
            .into_iter()
            .flat_map(|m| m.iter().map(|(to, w)| (to.as_str(), *w)))
    }

    /// All edges as `(from, to, weight)` in deterministic order.
    pub fn all_edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.edges.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(to, w)| (from.as_str(), to.as_str(), *w))
        })
    }

    /// Union another graph into this one.
    ///
    /// Vertex sets are reconciled independently of edges so isolated
    /// vertices survive the merge.
    pub fn merge(&mut self, other: Self) {
        self.vertices.extend(other.vertices);
        for (from, targets) in other.edges {
            for (to, weight) in targets {
                *self
                    .edges
                    .entry(from.clone())
                    .or_default()
                    .entry(to)
                    .or_insert(0.0) += weight;
            }
        }
    }

    /// Finalize the graph for ranking:
    /// 1. prune self-loops with weight ≤ 1.0 (heavier ones are intrinsic
    ///    markers and stay),
    /// 2. drop non-positive edges and clamp the rest into `(0, MAX_EDGE_WEIGHT]`,
    /// 3. remove `__`-prefixed virtual vertices that no real file points at,
    /// 4. cap out-degree at [`MAX_OUT_DEGREE`], keeping the heaviest edges,
    ///    ties broken by target path.
    pub fn finalize(&mut self) {
        for (from, targets) in &mut self.edges {
            targets.retain(|to, weight| {
                if *weight <= 0.0 {
                    return false;
                }
                if to == from && *weight <= 1.0 {
                    return false;
                }
                *weight = weight.min(MAX_EDGE_WEIGHT);
                true
            });
        }
        self.edges.retain(|_, targets| !targets.is_empty());

        self.remove_virtual_vertices();
        self.cap_out_degree();
    }

    fn remove_virtual_vertices(&mut self) {
        let mut referenced: BTreeSet<String> = BTreeSet::new();
        for (from, targets) in &self.edges {
            if from.starts_with("__") {
                continue;
            }
            for to in targets.keys() {
                if to.starts_with("__") {
                    referenced.insert(to.clone());
                }
            }
        }

        let doomed: Vec<String> = self
            .vertices
            .iter()
            .filter(|v| v.starts_with("__") && !referenced.contains(*v))
            .cloned()
            .collect();
        for vertex in &doomed {
            self.vertices.remove(vertex);
            self.edges.remove(vertex);
        }
        for targets in self.edges.values_mut() {
            targets.retain(|to, _| !doomed.contains(to));
        }
        self.edges.retain(|_, targets| !targets.is_empty());
    }

    fn cap_out_degree(&mut self) {
        for targets in self.edges.values_mut() {
            if targets.len() <= MAX_OUT_DEGREE {
                continue;
            }
            let mut ranked: Vec<(String, f64)> =
                targets.iter().map(|(to, w)| (to.clone(), *w)).collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            ranked.truncate(MAX_OUT_DEGREE);
            *targets = ranked.into_iter().collect();
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
