use super::*;
use crate::cancel::CancelToken;
use crate::scanner::categorize;

use std::fs;

use tempfile::TempDir;

fn extract(files: &[(&str, &str)]) -> SignalBundle {
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

    let cancel = CancelToken::new();
    let ctx = ExtractContext::new(dir.path(), &records, &cancel);
    let mut bundle = SignalBundle::default();
    CiExtractor::new().extract(&ctx, &mut bundle).unwrap();
    bundle
}

const GITHUB_WORKFLOW: &str = "\
name: ci
on: push
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: go build ./cmd/server
      - run: |
          go test ./internal/core
          cp config.yaml /tmp
  lint:
    steps:
      - run: eslint src/main.ts
";

#[test]
fn test_github_workflow_jobs() {
    let bundle = extract(&[(".github/workflows/ci.yml", GITHUB_WORKFLOW)]);

    let config = &bundle.ci_configs[0];
    assert_eq!(config.path, ".github/workflows/ci.yml");
    assert_eq!(config.jobs, vec!["build", "lint"]);

    assert!(bundle.ci_refs["build"].contains(&"cmd/server".to_string()));
    assert!(bundle.ci_refs["build"].contains(&"internal/core".to_string()));
    assert!(bundle.ci_refs["lint"].contains(&"src/main.ts".to_string()));
}

#[test]
fn test_gitlab_jobs_skip_reserved_keys() {
    let text = "\
stages:
  - build
variables:
  FOO: bar
compile:
  script:
    - go build cmd/api/main.go
.hidden:
  script:
    - echo skip
";
    let bundle = extract(&[(".gitlab-ci.yml", text)]);
    let config = &bundle.ci_configs[0];
    assert_eq!(config.jobs, vec!["compile"]);
    assert!(bundle.ci_refs["compile"].contains(&"cmd/api/main.go".to_string()));
}

#[test]
fn test_env_references_do_not_become_paths() {
    let text = "\
jobs:
  deploy:
    steps:
      - run: cp $BUILD_DIR/app.ts ${TARGET}/x
";
    let bundle = extract(&[(".github/workflows/deploy.yml", text)]);
    let refs = bundle.ci_refs.get("deploy").cloned().unwrap_or_default();
    assert!(
        refs.iter().all(|r| !r.contains("BUILD_DIR") && !r.contains("TARGET")),
        "refs: {refs:?}"
    );
}

#[test]
fn test_double_star_glob_uses_representatives() {
    let text = "\
jobs:
  check:
    steps:
      - run: prettier --check src/**/*.ts
";
    let bundle = extract(&[(".github/workflows/fmt.yml", text)]);
    let refs = &bundle.ci_refs["check"];
    assert!(refs.contains(&"src/index.ts".to_string()));
    assert!(refs.contains(&"src/main.ts".to_string()));
    assert!(refs.contains(&"src/app.ts".to_string()));
}

#[test]
fn test_simple_glob_expands_against_scanned_files() {
    let text = "\
jobs:
  test:
    steps:
      - run: vitest run tests/*.ts
";
    let bundle = extract(&[
        (".github/workflows/test.yml", text),
        ("tests/one.ts", "export {}"),
        ("tests/two.ts", "export {}"),
    ]);
    let refs = &bundle.ci_refs["test"];
    assert!(refs.contains(&"tests/one.ts".to_string()));
    assert!(refs.contains(&"tests/two.ts".to_string()));
}

#[test]
fn test_travis_single_job() {
    let text = "\
language: go
script:
  - go test ./internal/db
";
    let bundle = extract(&[(".travis.yml", text)]);
    assert!(bundle.ci_refs["travis"].contains(&"internal/db".to_string()));
}

#[test]
fn test_jenkinsfile_sh_commands() {
    let text = "pipeline { stages { stage('b') { steps { sh 'go build cmd/app/main.go' } } } }";
    let bundle = extract(&[("Jenkinsfile", text)]);
    assert!(bundle.ci_refs["jenkins"].contains(&"cmd/app/main.go".to_string()));
}

#[test]
fn test_non_ci_yaml_ignored() {
    let bundle = extract(&[("config/settings.yml", "a: 1\n")]);
    assert!(bundle.ci_configs.is_empty());
    assert!(bundle.ci_refs.is_empty());
}
