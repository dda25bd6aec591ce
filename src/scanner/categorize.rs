//! File categorization into [`FileRecord`] flags.

use crate::path_utils;

use super::types::FileRecord;

const CONFIG_BASENAMES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "composer.json",
    "composer.lock",
    "go.mod",
    "go.sum",
    "cargo.toml",
    "cargo.lock",
    "pyproject.toml",
    "requirements.txt",
    "poetry.lock",
    "yarn.lock",
    "pnpm-lock.yaml",
    "tsconfig.json",
    "jsconfig.json",
    "wails.json",
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
    "phpunit.xml",
    ".gitignore",
    ".dockerignore",
    ".editorconfig",
    ".env.example",
    ".babelrc",
];

const DOC_BASENAMES: &[&str] = &[
    "readme",
    "readme.md",
    "readme.txt",
    "license",
    "license.md",
    "changelog",
    "changelog.md",
    "contributing.md",
    "code_of_conduct.md",
    "authors",
    "notice",
];

const DOC_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst", ".adoc"];

const SCRIPT_BASENAMES: &[&str] = &[
    "makefile",
    "gnumakefile",
    "justfile",
    "rakefile",
    "dockerfile",
    "taskfile.yml",
    "taskfile.yaml",
    "procfile",
    "jenkinsfile",
    "gulpfile.js",
    "gruntfile.js",
];

const SCRIPT_EXTENSIONS: &[&str] = &[".sh", ".bash", ".zsh", ".fish", ".ps1", ".bat", ".cmd", ".mk"];

const GENERATED_SUFFIXES: &[&str] =
    &[".pb.go", ".g.dart", "_pb2.py", ".d.ts", ".min.js", ".min.css"];

const GENERATED_SEGMENTS: &[&str] = &[
    "generated",
    "gen",
    "__generated__",
    "proto",
    "build",
    "dist",
    "target",
];

const VENDORED_SEGMENTS: &[&str] = &[
    "vendor",
    "node_modules",
    "bower_components",
    "jspm_packages",
    "third_party",
    "external",
    ".venv",
    "venv",
];

/// Build the [`FileRecord`] for a normalized workspace-relative path.
#[must_use]
pub fn categorize(path: &str, size_bytes: u64) -> FileRecord {
    let basename = path_utils::basename(path).to_string();
    let extension = path_utils::extension(path);
    let lower = basename.to_ascii_lowercase();

    FileRecord {
        is_config: is_config(&basename, &lower),
        is_doc: is_doc(path, &lower, &extension),
        is_script: is_script(&lower, &extension),
        is_generated: is_generated(path, &basename),
        is_vendored: is_vendored(path),
        path: path.to_string(),
        size_bytes,
        extension,
        basename,
    }
}

fn is_config(basename: &str, lower: &str) -> bool {
    CONFIG_BASENAMES.contains(&lower)
        || lower.contains("config")
        || lower.contains(".rc")
        || basename.starts_with(".eslint")
        || basename.starts_with(".prettier")
}

fn is_doc(path: &str, lower: &str, extension: &str) -> bool {
    if DOC_BASENAMES.contains(&lower) || DOC_EXTENSIONS.contains(&extension) {
        return true;
    }
    path_utils::parent(path)
        .split('/')
        .any(|seg| seg.to_ascii_lowercase().contains("doc"))
}

fn is_script(lower: &str, extension: &str) -> bool {
    SCRIPT_BASENAMES.contains(&lower) || SCRIPT_EXTENSIONS.contains(&extension)
}

fn is_generated(path: &str, basename: &str) -> bool {
    if basename.contains(".generated.")
        || GENERATED_SUFFIXES.iter().any(|s| basename.ends_with(s))
    {
        return true;
    }
    GENERATED_SEGMENTS
        .iter()
        .any(|seg| path_utils::has_segment(path, seg))
}

fn is_vendored(path: &str) -> bool {
    VENDORED_SEGMENTS
        .iter()
        .any(|seg| path_utils::has_segment(path, seg))
}

#[cfg(test)]
#[path = "categorize_tests.rs"]
mod tests;
