use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Signal weights used by the scorer. Serialized into the profile so a
/// reader can see which heuristics produced a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    pub graph_centrality: f64,
    pub git_recency: f64,
    pub git_frequency: f64,
    pub script_ci_refs: f64,
    pub doc_mentions: f64,
    pub cap_max: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            graph_centrality: 0.45,
            git_recency: 0.20,
            git_frequency: 0.15,
            script_ci_refs: 0.10,
            doc_mentions: 0.10,
            cap_max: 0.98,
        }
    }
}

impl Heuristics {
    /// Weights with the git components zeroed and their mass shifted onto
    /// the remaining signals, preserving the total.
    #[must_use]
    pub fn without_git(self) -> Self {
        let remaining = self.graph_centrality + self.script_ci_refs + self.doc_mentions;
        if remaining <= 0.0 {
            return Self {
                git_recency: 0.0,
                git_frequency: 0.0,
                ..self
            };
        }
        let zeroed = self.git_recency + self.git_frequency;
        let scale = (remaining + zeroed) / remaining;
        Self {
            graph_centrality: self.graph_centrality * scale,
            git_recency: 0.0,
            git_frequency: 0.0,
            script_ci_refs: self.script_ci_refs * scale,
            doc_mentions: self.doc_mentions * scale,
            cap_max: self.cap_max,
        }
    }
}

/// One ranked entry with full provenance: every weighted component, every
/// penalty, and the human-readable reasons behind the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantFile {
    pub path: String,
    pub score: f64,
    pub reasons: Vec<String>,
    pub components: BTreeMap<String, f64>,
    pub penalties: BTreeMap<String, f64>,
    pub confidence: f64,
    pub is_generated: bool,
}
