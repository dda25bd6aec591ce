//! Task-runner extraction: Makefile, Justfile, Taskfile, Procfile, shell.
//!
//! Each target/recipe becomes a `script_refs` key whose value is the
//! deduplicated list of path-like tokens in its commands.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

use super::types::{Script, SignalBundle};
use super::{ExtractContext, SignalExtractor, pathtokens};

static MAKE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_./\-]*)\s*:([^=]|$)").expect("valid make-target regex")
});

static JUST_RECIPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_\-]*)(?:\s+[A-Za-z0-9_\-'=\+ ]*)?\s*:\s*$")
        .expect("valid just-recipe regex")
});

static TASKFILE_TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  ([A-Za-z0-9_\-]+):\s*$").expect("valid taskfile regex"));

static PROCFILE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_\-]+):\s*(.+)$").expect("valid procfile regex")
});

pub struct ScriptsExtractor;

impl ScriptsExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for ScriptsExtractor {
    fn name(&self) -> &'static str {
        "scripts"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        for record in ctx.files() {
            ctx.checkpoint()?;
            if !record.is_script {
                continue;
            }
            let Some(text) = ctx.read(&record.path) else {
                continue;
            };
            match record.basename.to_ascii_lowercase().as_str() {
                "makefile" | "gnumakefile" => {
                    collect_jobs(bundle, "make", parse_make(&text));
                }
                "justfile" => collect_jobs(bundle, "just", parse_just(&text)),
                "taskfile.yml" | "taskfile.yaml" => {
                    collect_jobs(bundle, "task", parse_taskfile(&text));
                }
                "procfile" => collect_jobs(bundle, "procfile", parse_procfile(&text)),
                _ if is_shell(&record.extension) => {
                    let name = record.basename.clone();
                    collect_jobs(bundle, "shell", vec![(name, text)]);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn is_shell(extension: &str) -> bool {
    matches!(extension, ".sh" | ".bash" | ".zsh" | ".fish" | ".ps1" | ".bat" | ".cmd")
}

fn collect_jobs(bundle: &mut SignalBundle, source: &str, jobs: Vec<(String, String)>) {
    for (name, cmd) in jobs {
        let paths = pathtokens::extract(&cmd);
        bundle.add_script_refs(&name, paths.clone());
        bundle.scripts.push(Script {
            name,
            source: source.to_string(),
            cmd: cmd.trim().to_string(),
            paths,
        });
    }
}

/// Targets with their concatenated tab-indented recipes.
fn parse_make(text: &str) -> Vec<(String, String)> {
    let mut jobs: Vec<(String, String)> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if line.starts_with('\t') {
            if let Some(idx) = current {
                let recipe = line.trim_start().trim_start_matches(['@', '-']);
                jobs[idx].1.push_str(recipe);
                jobs[idx].1.push('\n');
            }
            continue;
        }
        current = None;
        if line.starts_with('.') || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = MAKE_TARGET.captures(line) {
            let name = caps[1].to_string();
            jobs.push((name, String::new()));
            current = Some(jobs.len() - 1);
        }
    }
    jobs
}

/// Justfile recipes: an unindented `name:` header with indented body lines.
fn parse_just(text: &str) -> Vec<(String, String)> {
    let mut jobs: Vec<(String, String)> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(idx) = current {
                jobs[idx].1.push_str(line.trim_start());
                jobs[idx].1.push('\n');
            }
            continue;
        }
        current = None;
        if let Some(caps) = JUST_RECIPE.captures(line) {
            jobs.push((caps[1].to_string(), String::new()));
            current = Some(jobs.len() - 1);
        }
    }
    jobs
}

/// Taskfile tasks: keys two spaces under `tasks:`, commands from `- ` items
/// and `cmd:` lines.
fn parse_taskfile(text: &str) -> Vec<(String, String)> {
    let mut jobs: Vec<(String, String)> = Vec::new();
    let mut in_tasks = false;
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if !line.starts_with(' ') {
            in_tasks = line.trim_end() == "tasks:";
            current = None;
            continue;
        }
        if !in_tasks {
            continue;
        }
        if let Some(caps) = TASKFILE_TASK.captures(line) {
            jobs.push((caps[1].to_string(), String::new()));
            current = Some(jobs.len() - 1);
            continue;
        }
        if let Some(idx) = current {
            let trimmed = line.trim_start();
            let cmd = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("cmd:").map(str::trim_start));
            if let Some(cmd) = cmd {
                jobs[idx].1.push_str(cmd.trim_matches('"'));
                jobs[idx].1.push('\n');
            }
        }
    }
    jobs
}

fn parse_procfile(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            PROCFILE_ENTRY
                .captures(line)
                .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "scripts_tests.rs"]
mod tests;
