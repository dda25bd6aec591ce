use super::*;

use std::fs;

use tempfile::TempDir;

fn write(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_detect_languages_typescript_majority() {
    let mut bundle = SignalBundle::default();
    bundle.ts_files = vec!["a.ts".into(), "b.tsx".into(), "c.js".into()];
    assert_eq!(detect_languages(&bundle), vec!["typescript"]);
}

#[test]
fn test_detect_languages_javascript_majority() {
    let mut bundle = SignalBundle::default();
    bundle.ts_files = vec!["a.js".into(), "b.cjs".into(), "c.ts".into()];
    bundle.go_files = vec!["main.go".into()];
    bundle.php_files = vec!["index.php".into()];
    assert_eq!(detect_languages(&bundle), vec!["javascript", "go", "php"]);
}

#[test]
fn test_detect_languages_empty() {
    assert!(detect_languages(&SignalBundle::default()).is_empty());
}

#[test]
fn test_jaccard_bounds() {
    let a = vec!["x".to_string(), "y".to_string()];
    let b = vec!["x".to_string(), "y".to_string()];
    assert!((jaccard_distance(&a, &b) - 0.0).abs() < f64::EPSILON);

    let disjoint = vec!["p".to_string(), "q".to_string()];
    assert!((jaccard_distance(&a, &disjoint) - 1.0).abs() < f64::EPSILON);

    let empty: Vec<String> = vec![];
    assert!((jaccard_distance(&empty, &empty) - 0.0).abs() < f64::EPSILON);

    let half = vec!["x".to_string(), "p".to_string()];
    let d = jaccard_distance(&a, &half);
    assert!(d > 0.0 && d < 1.0);
}

#[test]
fn test_apply_boosts_resorts() {
    let mut ranked = vec![
        ImportantFile {
            path: "a.go".to_string(),
            score: 0.9,
            reasons: vec![],
            components: BTreeMap::new(),
            penalties: BTreeMap::new(),
            confidence: 1.0,
            is_generated: false,
        },
        ImportantFile {
            path: "b.go".to_string(),
            score: 0.5,
            reasons: vec![],
            components: BTreeMap::new(),
            penalties: BTreeMap::new(),
            confidence: 1.0,
            is_generated: false,
        },
    ];
    let boosts = BTreeMap::from([("b.go".to_string(), 0.6)]);
    apply_boosts(&mut ranked, &boosts);
    assert_eq!(ranked[0].path, "b.go");
    assert!((ranked[0].score - 1.1).abs() < 1e-9);
}

#[test]
fn test_should_run_when_no_profile() {
    let dir = TempDir::new().unwrap();
    assert!(should_run(dir.path()));
}

#[test]
fn test_run_then_should_run_false_until_manifest_changes() {
    let dir = TempDir::new().unwrap();
    write(&dir, "go.mod", "module acme\n\ngo 1.20\n");
    write(&dir, "main.go", "package main\nfunc main(){}\n");

    run(dir.path(), &RunOptions::default()).unwrap();
    assert!(!should_run(dir.path()));

    write(&dir, "go.mod", "module acme\n\ngo 1.22\n");
    assert!(should_run(dir.path()));
}

#[test]
fn test_run_writes_profile_and_reports_metrics() {
    let dir = TempDir::new().unwrap();
    write(&dir, "go.mod", "module acme\n\ngo 1.20\n");
    write(&dir, "main.go", "package main\nfunc main(){}\n");

    let profile = run(dir.path(), &RunOptions::default()).unwrap();
    assert_eq!(profile.version, PROFILE_VERSION);
    assert_eq!(profile.metrics.files, 2);
    assert_eq!(profile.languages, vec!["go"]);
    assert!(profile.metrics.rank_churn.is_none());

    let loaded = Profile::load(&writer::profile_path(dir.path())).unwrap();
    assert_eq!(loaded.version, PROFILE_VERSION);
}

#[test]
fn test_second_run_reports_churn() {
    let dir = TempDir::new().unwrap();
    write(&dir, "go.mod", "module acme\n");
    write(&dir, "main.go", "package main\nfunc main(){}\n");

    run(dir.path(), &RunOptions::default()).unwrap();
    let second = run(dir.path(), &RunOptions::default()).unwrap();
    let churn = second.metrics.rank_churn.unwrap();
    assert!((churn - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_manual_boosts_loaded_and_applied() {
    let dir = TempDir::new().unwrap();
    write(&dir, "go.mod", "module acme\n");
    write(&dir, "main.go", "package main\nfunc main(){}\n");
    write(&dir, "side.go", "package main\n");
    write(
        &dir,
        ".loom/manual_boosts.json",
        r#"{"side.go": 0.9}"#,
    );

    let profile = run(dir.path(), &RunOptions::default()).unwrap();
    assert_eq!(profile.manual_boosts.get("side.go"), Some(&0.9));
    assert_eq!(profile.important_files[0].path, "side.go");
}

#[test]
fn test_malformed_boosts_ignored() {
    let dir = TempDir::new().unwrap();
    write(&dir, "main.go", "package main\n");
    write(&dir, ".loom/manual_boosts.json", "{not json");

    let profile = run(dir.path(), &RunOptions::default()).unwrap();
    assert!(profile.manual_boosts.is_empty());
}

#[test]
fn test_cancellation_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(&dir, "main.go", "package main\n");

    let options = RunOptions::default();
    options.cancel.cancel();
    assert!(run(dir.path(), &options).is_err());
    assert!(!writer::profile_path(dir.path()).exists());
}
