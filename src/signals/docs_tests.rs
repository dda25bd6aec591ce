use super::*;
use crate::cancel::CancelToken;
use crate::scanner::categorize;

use std::fs;

use tempfile::TempDir;

fn extract(files: &[(&str, &str)]) -> Vec<String> {
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
    DocsExtractor::new().extract(&ctx, &mut bundle).unwrap();
    bundle.doc_refs
}

#[test]
fn test_inline_code_paths() {
    let refs = extract(&[("README.md", "Edit `src/config.ts` before running.")]);
    assert!(refs.contains(&"src/config.ts".to_string()));
}

#[test]
fn test_markdown_link_targets() {
    let refs = extract(&[(
        "README.md",
        "See [the entrypoint](./cmd/server/main.go) and [docs](https://example.com/page).",
    )]);
    assert!(refs.contains(&"cmd/server/main.go".to_string()));
    assert!(refs.iter().all(|r| !r.contains("example.com")));
}

#[test]
fn test_plain_text_paths() {
    let refs = extract(&[("NOTES.txt", "The scheduler lives in internal/scheduler/loop.go, see there.")]);
    assert!(refs.contains(&"internal/scheduler/loop.go".to_string()));
}

#[test]
fn test_fenced_block_headers() {
    let refs = extract(&[(
        "README.md",
        "```ts title=src/app/main.ts\nconsole.log(1)\n```\n",
    )]);
    assert!(refs.contains(&"src/app/main.ts".to_string()));
}

#[test]
fn test_multiplicity_preserved() {
    let refs = extract(&[(
        "README.md",
        "Run `main.go` first.\n\nThen edit `main.go` again.\n",
    )]);
    assert_eq!(refs.iter().filter(|r| *r == "main.go").count(), 2);
}

#[test]
fn test_inline_code_not_double_counted() {
    let refs = extract(&[("README.md", "Check `src/one.ts` now.")]);
    assert_eq!(refs.iter().filter(|r| *r == "src/one.ts").count(), 1);
}

#[test]
fn test_prose_words_rejected() {
    let refs = extract(&[(
        "README.md",
        "This project is a simple. fast. tool for everyone, really!",
    )]);
    assert!(refs.is_empty(), "refs: {refs:?}");
}

#[test]
fn test_anchors_stripped_from_links() {
    let refs = extract(&[("README.md", "See [setup](docs/setup.md#install).")]);
    assert!(refs.contains(&"docs/setup.md".to_string()));
}

#[test]
fn test_non_doc_files_ignored() {
    let refs = extract(&[("main.go", "// mentions src/other.go in a comment")]);
    assert!(refs.is_empty());
}
