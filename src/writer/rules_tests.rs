use super::*;

use std::collections::BTreeMap;

use crate::gitstats::GitMode;
use crate::profile::{GitStatsInfo, InputSignature, Metrics, PROFILE_VERSION, Profile};
use crate::scorer::{Heuristics, ImportantFile};
use crate::signals::{CiConfig, ConfigFile, EntryPoint, Script};

fn base_profile() -> Profile {
    Profile {
        workspace_root: "/work".to_string(),
        created_at_unix: 0,
        languages: vec!["typescript".to_string(), "go".to_string()],
        entrypoints: vec![EntryPoint {
            path: "main.go".to_string(),
            kind: EntryPointKind::Backend,
            hints: vec!["go-main".to_string()],
        }],
        scripts: vec![Script {
            name: "build".to_string(),
            source: "make".to_string(),
            cmd: "go build ./...".to_string(),
            paths: vec![],
        }],
        ci: vec![CiConfig {
            path: ".github/workflows/ci.yml".to_string(),
            jobs: vec!["build".to_string(), "lint".to_string()],
        }],
        configs: vec![ConfigFile {
            tool: "go".to_string(),
            path: "go.mod".to_string(),
        }],
        codegen: vec![],
        routes_services: vec![],
        important_files: vec![
            ImportantFile {
                path: "main.go".to_string(),
                score: 0.7,
                reasons: vec!["entrypoint".to_string()],
                components: BTreeMap::new(),
                penalties: BTreeMap::new(),
                confidence: 1.0,
                is_generated: false,
            },
            ImportantFile {
                path: "gen/api.pb.go".to_string(),
                score: 0.1,
                reasons: vec![],
                components: BTreeMap::new(),
                penalties: BTreeMap::new(),
                confidence: 1.0,
                is_generated: true,
            },
        ],
        heuristics: Heuristics::default(),
        gitstats: GitStatsInfo {
            mode: GitMode::None,
            window_days: 730,
        },
        git_window_days: 730,
        input_signature: InputSignature::default(),
        metrics: Metrics::default(),
        manual_boosts: BTreeMap::new(),
        version: PROFILE_VERSION.to_string(),
    }
}

#[test]
fn test_stable_section_headers() {
    let rendered = render_rules(&base_profile());
    for header in [
        "## Languages",
        "## Entrypoints",
        "## Commands",
        "## Tools & Configuration",
        "## Code Generation",
        "## CI/CD",
        "## Generated/Ignored Files",
        "## Key Files",
    ] {
        assert!(rendered.contains(header), "missing header {header}");
    }
}

#[test]
fn test_content_rendered_into_sections() {
    let rendered = render_rules(&base_profile());
    assert!(rendered.contains("- typescript"));
    assert!(rendered.contains("`main.go` (backend; go-main)"));
    assert!(rendered.contains("**build** (make)"));
    assert!(rendered.contains(".github/workflows/ci.yml"));
    assert!(rendered.contains("gen/api.pb.go"));
}

#[test]
fn test_empty_profile_renders_placeholders() {
    let mut profile = base_profile();
    profile.languages.clear();
    profile.entrypoints.clear();
    profile.scripts.clear();
    profile.ci.clear();
    profile.configs.clear();
    profile.important_files.clear();

    let rendered = render_rules(&profile);
    assert!(rendered.contains("No supported languages detected."));
    assert!(rendered.contains("None detected."));
    assert!(rendered.contains("None ranked."));
}

#[test]
fn test_key_files_limited_to_twenty() {
    let mut profile = base_profile();
    profile.important_files = (0..30)
        .map(|i| ImportantFile {
            path: format!("src/f{i:02}.go"),
            score: 0.5,
            reasons: vec![],
            components: BTreeMap::new(),
            penalties: BTreeMap::new(),
            confidence: 1.0,
            is_generated: false,
        })
        .collect();

    let rendered = render_rules(&profile);
    assert!(rendered.contains("src/f19.go"));
    assert!(!rendered.contains("src/f20.go"));
}
