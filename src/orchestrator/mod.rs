//! Pipeline sequencing: scan → signals → graph → git stats → PageRank →
//! scoring → profile assembly → write, with cooperative cancellation
//! between stages.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Instant;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::gitstats::{self, DEFAULT_WINDOW_DAYS};
use crate::graph::{GraphBuilder, pagerank};
use crate::profile::{GitStatsInfo, Metrics, PROFILE_VERSION, Profile, compute_signature};
use crate::scanner::{ScanOptions, Scanner};
use crate::scorer::{self, Heuristics, ImportantFile, ScoreInputs};
use crate::signals::{SignalBundle, SignalCollector};
use crate::writer;

/// How many top paths feed the rank-churn comparison.
const CHURN_TOP_N: usize = 20;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub window_days: u32,
    pub respect_gitignore: bool,
    pub cancel: CancelToken,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            respect_gitignore: false,
            cancel: CancelToken::new(),
        }
    }
}

/// Execute the full pipeline and persist the artifacts.
///
/// # Errors
/// - `WorkspaceUnreadable` when the root cannot be scanned,
/// - `Cancelled` when the token fires (nothing is written),
/// - IO errors from the final artifact write.
#[allow(clippy::too_many_lines)] // one stage per block, in pipeline order
pub fn run(workspace: &Path, options: &RunOptions) -> Result<Profile> {
    let started = Instant::now();
    let cancel = &options.cancel;

    let root = dunce::canonicalize(workspace).unwrap_or_else(|_| workspace.to_path_buf());

    let scanner = Scanner::new(ScanOptions {
        respect_gitignore: options.respect_gitignore,
    });
    let files = scanner.scan(&root, cancel)?;
    cancel.checkpoint()?;

    let bundle = SignalCollector::new().collect(&root, &files, cancel)?;
    cancel.checkpoint()?;

    let graph = GraphBuilder::new().build(&root, &files, &bundle, cancel)?;
    cancel.checkpoint()?;

    let gitstats = gitstats::extract(&root, options.window_days, cancel)?;
    cancel.checkpoint()?;

    let ranking = pagerank(&graph);
    cancel.checkpoint()?;

    let mut important_files = scorer::score(&ScoreInputs {
        files: &files,
        centrality: &ranking.scores,
        gitstats: &gitstats,
        bundle: &bundle,
        weights: Heuristics::default(),
    });

    // The prior profile must be read before the writer replaces it.
    let prior = Profile::load(&writer::profile_path(&root)).ok();

    let manual_boosts = load_manual_boosts(&root);
    apply_boosts(&mut important_files, &manual_boosts);

    let rank_churn = prior.as_ref().map(|previous| {
        jaccard_distance(
            &top_paths(&important_files, CHURN_TOP_N),
            &previous
                .top_paths(CHURN_TOP_N)
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>(),
        )
    });

    #[allow(clippy::cast_possible_truncation)]
    let duration_ms = started.elapsed().as_millis() as u64;
    let profile = Profile {
        workspace_root: root.to_string_lossy().into_owned(),
        created_at_unix: unix_now(),
        languages: detect_languages(&bundle),
        entrypoints: bundle.entrypoints.clone(),
        scripts: bundle.scripts.clone(),
        ci: bundle.ci_configs.clone(),
        configs: bundle.configs.clone(),
        codegen: bundle.codegen.clone(),
        routes_services: bundle.routes_services.clone(),
        important_files,
        heuristics: if gitstats.mode == crate::gitstats::GitMode::None {
            Heuristics::default().without_git()
        } else {
            Heuristics::default()
        },
        gitstats: GitStatsInfo {
            mode: gitstats.mode,
            window_days: gitstats.window_days,
        },
        git_window_days: gitstats.window_days,
        input_signature: compute_signature(&root),
        metrics: Metrics {
            files: files.len(),
            edges: graph.edge_count(),
            pagerank_iters: ranking.iterations,
            duration_ms,
            rank_churn,
        },
        manual_boosts,
        version: PROFILE_VERSION.to_string(),
    };

    cancel.checkpoint()?;
    writer::write_artifacts(&root, &profile)?;
    Ok(profile)
}

/// Whether a fresh run is needed: no prior profile, an incompatible prior
/// profile, or a changed input signature.
#[must_use]
pub fn should_run(workspace: &Path) -> bool {
    let root = dunce::canonicalize(workspace).unwrap_or_else(|_| workspace.to_path_buf());
    match Profile::load(&writer::profile_path(&root)) {
        Err(_) => true,
        Ok(prior) => prior.input_signature != compute_signature(&root),
    }
}

/// Detected languages: TS vs JS by majority extension within the TS/JS
/// partition, plus `go` and `php` when present.
fn detect_languages(bundle: &SignalBundle) -> Vec<String> {
    let mut languages = Vec::new();
    if !bundle.ts_files.is_empty() {
        let ts_count = bundle
            .ts_files
            .iter()
            .filter(|p| p.ends_with(".ts") || p.ends_with(".tsx"))
            .count();
        let js_count = bundle.ts_files.len() - ts_count;
        if ts_count >= js_count {
            languages.push("typescript".to_string());
        } else {
            languages.push("javascript".to_string());
        }
    }
    if !bundle.go_files.is_empty() {
        languages.push("go".to_string());
    }
    if !bundle.php_files.is_empty() {
        languages.push("php".to_string());
    }
    languages
}

/// Optional user-owned boosts; empty on any error.
fn load_manual_boosts(root: &Path) -> BTreeMap<String, f64> {
    std::fs::read_to_string(writer::manual_boosts_path(root))
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default()
}

/// Boosts apply after truncation, then the list re-sorts with the same
/// comparator the scorer used.
fn apply_boosts(ranked: &mut [ImportantFile], boosts: &BTreeMap<String, f64>) {
    if boosts.is_empty() {
        return;
    }
    for file in ranked.iter_mut() {
        if let Some(delta) = boosts.get(&file.path) {
            file.score += delta;
        }
    }
    scorer::sort_ranked(ranked);
}

fn top_paths(ranked: &[ImportantFile], n: usize) -> Vec<String> {
    ranked.iter().take(n).map(|f| f.path.clone()).collect()
}

/// Jaccard distance over two path lists: `1 − |∩| / |∪|`, with identical
/// (including empty) lists giving 0 and disjoint lists giving 1.
fn jaccard_distance(current: &[String], previous: &[String]) -> f64 {
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    let previous: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let union = current.union(&previous).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = current.intersection(&previous).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = intersection as f64 / union as f64;
    1.0 - ratio
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
