mod types;

pub use types::{Heuristics, ImportantFile};

use std::collections::BTreeMap;

use crate::gitstats::{GitMode, GitStats};
use crate::path_utils;
use crate::scanner::FileRecord;
use crate::signals::SignalBundle;

/// Ranked list length cap.
pub const MAX_RANKED_FILES: usize = 200;

/// No single weighted component may exceed this share of the pre-cap total.
const COMPONENT_CAP_SHARE: f64 = 0.65;

const GENERATED_PENALTY: f64 = 0.2;
const LARGE_PENALTY: f64 = 0.1;
const TEST_PENALTY: f64 = 0.7;
const LARGE_FILE_BYTES: u64 = 512 * 1024;

const ENTRYPOINT_BONUS: f64 = 0.01;
const ROUTES_BONUS: f64 = 0.01;
const MANIFEST_BONUS: f64 = 0.005;

/// Basenames that look like canonical program entries.
const ENTRYPOINT_BASENAMES: &[&str] = &[
    "main.go", "app.tsx", "app.ts", "app.js", "index.tsx", "index.ts", "index.js", "server.ts",
    "server.js",
];

const MANIFEST_BASENAMES: &[&str] = &[
    "package.json",
    "composer.json",
    "go.mod",
    "Cargo.toml",
    "pyproject.toml",
    "wails.json",
];

/// Scoring inputs assembled by the orchestrator.
pub struct ScoreInputs<'a> {
    pub files: &'a [FileRecord],
    pub centrality: &'a BTreeMap<String, f64>,
    pub gitstats: &'a GitStats,
    pub bundle: &'a SignalBundle,
    pub weights: Heuristics,
}

/// Combine the five normalized signals into the ranked important-file list.
///
/// Weights are rebalanced when git data is absent; components are capped at
/// [`COMPONENT_CAP_SHARE`] of the total with proportional redistribution;
/// penalties are multiplicative with their absolute reductions recorded;
/// canonical names get a small additive tie-breaker; the final score clamps
/// to `cap_max`. The list is sorted by `(-score, path)` and truncated to
/// [`MAX_RANKED_FILES`].
#[must_use]
pub fn score(inputs: &ScoreInputs<'_>) -> Vec<ImportantFile> {
    let weights = if inputs.gitstats.mode == GitMode::None {
        inputs.weights.without_git()
    } else {
        inputs.weights
    };

    let script_counts = ref_counts(inputs.bundle);
    let script_max = normalization_max(&script_counts);
    let doc_counts = doc_counts(inputs.bundle);
    let doc_max = normalization_max(&doc_counts);

    let confidence = confidence(inputs);

    let mut ranked: Vec<ImportantFile> = inputs
        .files
        .iter()
        .map(|record| {
            score_file(
                record,
                inputs,
                weights,
                &script_counts,
                script_max,
                &doc_counts,
                doc_max,
                confidence,
            )
        })
        .collect();

    sort_ranked(&mut ranked);
    ranked.truncate(MAX_RANKED_FILES);
    ranked
}

/// Shared comparator: descending score, ascending path.
pub fn sort_ranked(ranked: &mut [ImportantFile]) {
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.path.cmp(&b.path))
    });
}

#[allow(clippy::too_many_arguments)]
fn score_file(
    record: &FileRecord,
    inputs: &ScoreInputs<'_>,
    weights: Heuristics,
    script_counts: &BTreeMap<&str, usize>,
    script_max: f64,
    doc_counts: &BTreeMap<&str, usize>,
    doc_max: f64,
    confidence: f64,
) -> ImportantFile {
    let path = record.path.as_str();
    let centrality = inputs.centrality.get(path).copied().unwrap_or(0.0);
    let recency = inputs.gitstats.recency.get(path).copied().unwrap_or(0.0);
    let frequency = inputs.gitstats.frequency.get(path).copied().unwrap_or(0.0);
    #[allow(clippy::cast_precision_loss)]
    let script_score = script_counts.get(path).map_or(0.0, |c| *c as f64 / script_max);
    #[allow(clippy::cast_precision_loss)]
    let doc_score = doc_counts.get(path).map_or(0.0, |c| *c as f64 / doc_max);

    let mut components = BTreeMap::new();
    components.insert("centrality".to_string(), weights.graph_centrality * centrality);
    components.insert("git_recency".to_string(), weights.git_recency * recency);
    components.insert("git_frequency".to_string(), weights.git_frequency * frequency);
    components.insert("script_refs".to_string(), weights.script_ci_refs * script_score);
    components.insert("doc_mentions".to_string(), weights.doc_mentions * doc_score);

    let weight_by_key: BTreeMap<&str, f64> = BTreeMap::from([
        ("centrality", weights.graph_centrality),
        ("git_recency", weights.git_recency),
        ("git_frequency", weights.git_frequency),
        ("script_refs", weights.script_ci_refs),
        ("doc_mentions", weights.doc_mentions),
    ]);
    cap_components(&mut components, &weight_by_key);
    let base: f64 = components.values().sum();

    let mut penalties = BTreeMap::new();
    let mut score = base;
    if record.is_generated || record.is_vendored {
        let reduced = score * GENERATED_PENALTY;
        penalties.insert("vendored".to_string(), score - reduced);
        score = reduced;
    } else if record.size_bytes > LARGE_FILE_BYTES && !record.is_config {
        let reduced = score * LARGE_PENALTY;
        penalties.insert("large".to_string(), score - reduced);
        score = reduced;
    }
    if is_test_file(path) {
        let reduced = score * TEST_PENALTY;
        penalties.insert("test".to_string(), score - reduced);
        score = reduced;
    }

    score += tie_breaker(record);
    if score > weights.cap_max {
        score = weights.cap_max;
    }

    let reasons = reasons(
        record,
        centrality,
        recency,
        frequency,
        script_score,
        doc_score,
    );

    ImportantFile {
        path: record.path.clone(),
        score,
        reasons,
        components,
        penalties,
        confidence,
        is_generated: record.is_generated,
    }
}

/// Cap every component at [`COMPONENT_CAP_SHARE`] of the pre-cap total and
/// redistribute the excess over the non-capped components, proportionally
/// to their values, or equally across carrying-weight components when the
/// non-capped values are all zero. Zero-weight components (zeroed git
/// signals) never receive mass. The total is preserved whenever a
/// recipient exists. One pass suffices: at most one component can exceed
/// 0.65 of the total.
fn cap_components(components: &mut BTreeMap<String, f64>, weight_by_key: &BTreeMap<&str, f64>) {
    let total: f64 = components.values().sum();
    if total <= 0.0 {
        return;
    }
    let cap = COMPONENT_CAP_SHARE * total;

    let mut excess = 0.0;
    let mut uncapped_sum = 0.0;
    let mut weighted_recipients = 0usize;
    for (key, value) in components.iter() {
        if *value > cap {
            excess += *value - cap;
        } else {
            uncapped_sum += *value;
            if weight_by_key.get(key.as_str()).copied().unwrap_or(0.0) > 0.0 {
                weighted_recipients += 1;
            }
        }
    }
    if excess <= 0.0 {
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let equal_share = if weighted_recipients > 0 {
        excess / weighted_recipients as f64
    } else {
        0.0
    };
    for (key, value) in components.iter_mut() {
        if *value > cap {
            *value = cap;
        } else if uncapped_sum > 0.0 {
            *value += excess * (*value / uncapped_sum);
        } else if weight_by_key.get(key.as_str()).copied().unwrap_or(0.0) > 0.0 {
            *value += equal_share;
        }
    }
}

fn is_test_file(path: &str) -> bool {
    let basename = path_utils::basename(path);
    basename.ends_with("_test.go")
        || [".test.", ".spec."].iter().any(|marker| {
            basename.contains(marker)
                && [".ts", ".tsx", ".js", ".jsx"].iter().any(|e| basename.ends_with(e))
        })
        || ["test", "tests", "__tests__", "spec"]
            .iter()
            .any(|seg| path_utils::has_segment(path, seg))
}

/// At most one additive bonus applies.
fn tie_breaker(record: &FileRecord) -> f64 {
    if ENTRYPOINT_BASENAMES.contains(&record.basename.as_str()) {
        return ENTRYPOINT_BONUS;
    }
    if record.extension == ".php" && record.path.starts_with("routes/") {
        return ROUTES_BONUS;
    }
    if MANIFEST_BASENAMES.contains(&record.basename.as_str()) {
        return MANIFEST_BONUS;
    }
    0.0
}

fn reasons(
    record: &FileRecord,
    centrality: f64,
    recency: f64,
    frequency: f64,
    script_score: f64,
    doc_score: f64,
) -> Vec<String> {
    let mut out = Vec::new();
    if centrality > 0.3 {
        out.push("graph_central".to_string());
    }
    if recency > 0.5 {
        out.push("recent_changes".to_string());
    }
    if frequency > 0.5 {
        out.push("frequently_changed".to_string());
    }
    if script_score > 0.3 {
        out.push("script_ref".to_string());
    }
    if doc_score > 0.3 {
        out.push("doc_mention".to_string());
    }
    if ENTRYPOINT_BASENAMES.contains(&record.basename.as_str()) {
        out.push("entrypoint".to_string());
    }
    if record.is_config {
        out.push("config".to_string());
    }
    out
}

/// Mention counts per path over `script_refs ∪ ci_refs`.
fn ref_counts(bundle: &SignalBundle) -> BTreeMap<&str, usize> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for paths in bundle.script_refs.values().chain(bundle.ci_refs.values()) {
        for path in paths {
            *counts.entry(path.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

fn doc_counts(bundle: &SignalBundle) -> BTreeMap<&str, usize> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for path in &bundle.doc_refs {
        *counts.entry(path.as_str()).or_insert(0) += 1;
    }
    counts
}

#[allow(clippy::cast_precision_loss)]
fn normalization_max(counts: &BTreeMap<&str, usize>) -> f64 {
    counts.values().copied().max().unwrap_or(1).max(1) as f64
}

/// Project-wide signal-quality estimate in `[0, 1]`.
fn confidence(inputs: &ScoreInputs<'_>) -> f64 {
    let bundle = inputs.bundle;
    let mut value: f64 = 1.0;
    if inputs.gitstats.mode == GitMode::None {
        value -= 0.2;
    }
    if bundle.doc_refs.is_empty() {
        value -= 0.1;
    }
    if bundle.script_refs.is_empty() && bundle.ci_refs.is_empty() {
        value -= 0.1;
    }
    if bundle.ts_files.is_empty() && bundle.go_files.is_empty() && bundle.php_files.is_empty() {
        value -= 0.1;
    }
    value.max(0.0)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
