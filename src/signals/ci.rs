//! CI definition extraction.
//!
//! Job structure is recovered with format-specific indentation/prefix rules,
//! not a YAML parser; CI files in the wild are too lax for strict parsing
//! and only the command text matters here.

use std::sync::LazyLock;

use globset::Glob;
use regex::Regex;

use crate::error::Result;
use crate::scanner::FileRecord;

use super::types::{CiConfig, SignalBundle};
use super::{ExtractContext, SignalExtractor, pathtokens};

/// Placeholder that breaks path-token matching on purpose.
const ENV_PLACEHOLDER: &str = "%ENV%";

/// Representative basenames emitted for `**/*` patterns instead of globbing.
const GLOB_REPRESENTATIVES: &[&str] = &["index", "main", "app"];

const GLOB_EXPANSION_CAP: usize = 200;

static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{[A-Za-z_][A-Za-z0-9_]*\}|\$[A-Za-z_][A-Za-z0-9_]*")
        .expect("valid env-ref regex")
});

static GITHUB_JOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  ([A-Za-z0-9_\-]+):").expect("valid job-key regex"));

static GITLAB_JOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.\-]+):\s*$").expect("valid gitlab-key regex"));

static AZURE_JOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*job:\s*([A-Za-z0-9_\-]+)").expect("valid azure regex"));

static JENKINS_SH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"sh\s+['"]([^'"]+)['"]"#).expect("valid jenkins regex"));

const GITLAB_RESERVED: &[&str] = &[
    "stages",
    "variables",
    "include",
    "default",
    "image",
    "services",
    "workflow",
    "cache",
    "before_script",
    "after_script",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CiFormat {
    GitHub,
    GitLab,
    CircleCi,
    Azure,
    Bitbucket,
    Travis,
    Jenkins,
}

pub struct CiExtractor;

impl CiExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for CiExtractor {
    fn name(&self) -> &'static str {
        "ci"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        for record in ctx.files() {
            ctx.checkpoint()?;
            let Some(format) = detect_format(record) else {
                continue;
            };
            let Some(text) = ctx.read(&record.path) else {
                continue;
            };

            let jobs = match format {
                CiFormat::GitHub => indented_jobs(&text, "jobs:", &["run:"]),
                CiFormat::CircleCi => indented_jobs(&text, "jobs:", &["run:", "command:"]),
                CiFormat::GitLab => gitlab_jobs(&text),
                CiFormat::Azure => azure_jobs(&text),
                CiFormat::Bitbucket => single_job("pipeline", list_commands(&text, "script:")),
                CiFormat::Travis => single_job("travis", list_commands(&text, "script:")),
                CiFormat::Jenkins => single_job(
                    "jenkins",
                    JENKINS_SH
                        .captures_iter(&text)
                        .map(|c| c[1].to_string())
                        .collect(),
                ),
            };

            let mut job_names = Vec::new();
            for (job, commands) in jobs {
                if !job_names.contains(&job) {
                    job_names.push(job.clone());
                }
                let joined_commands = commands.join("\n");
                let sanitized = ENV_REF.replace_all(&joined_commands, ENV_PLACEHOLDER);
                bundle.add_ci_refs(&job, resolve_refs(ctx, &sanitized));
            }

            bundle.ci_configs.push(CiConfig {
                path: record.path.clone(),
                jobs: job_names,
            });
        }
        Ok(())
    }
}

fn detect_format(record: &FileRecord) -> Option<CiFormat> {
    let yamlish = record.extension == ".yml" || record.extension == ".yaml";
    if record.path.starts_with(".github/workflows/") && yamlish {
        return Some(CiFormat::GitHub);
    }
    match record.basename.as_str() {
        ".gitlab-ci.yml" => Some(CiFormat::GitLab),
        "azure-pipelines.yml" => Some(CiFormat::Azure),
        "bitbucket-pipelines.yml" => Some(CiFormat::Bitbucket),
        ".travis.yml" => Some(CiFormat::Travis),
        "Jenkinsfile" => Some(CiFormat::Jenkins),
        "config.yml" if record.path == ".circleci/config.yml" => Some(CiFormat::CircleCi),
        _ => None,
    }
}

/// GitHub/CircleCI shape: named jobs two spaces under a `jobs:` section,
/// commands behind `run:`-style keys, block scalars included.
#[allow(clippy::cognitive_complexity)] // one state machine, three states
fn indented_jobs(text: &str, section: &str, command_keys: &[&str]) -> Vec<(String, Vec<String>)> {
    let mut jobs: Vec<(String, Vec<String>)> = Vec::new();
    let mut in_section = false;
    let mut block_indent: Option<usize> = None;

    for line in text.lines() {
        let indent = line.len() - line.trim_start().len();
        let trimmed = line.trim();

        if let Some(required) = block_indent {
            if trimmed.is_empty() || indent >= required {
                if let Some((_, commands)) = jobs.last_mut()
                    && !trimmed.is_empty()
                {
                    commands.push(trimmed.to_string());
                }
                continue;
            }
            block_indent = None;
        }

        if !line.starts_with(' ') {
            in_section = trimmed == section;
            continue;
        }
        if !in_section {
            continue;
        }

        if let Some(caps) = GITHUB_JOB.captures(line) {
            jobs.push((caps[1].to_string(), Vec::new()));
            continue;
        }

        for key in command_keys {
            if let Some(pos) = trimmed.find(key)
                && trimmed[..pos].trim_start_matches('-').trim().is_empty()
            {
                let value = trimmed[pos + key.len()..].trim();
                if value.is_empty() || value == "|" || value == ">" {
                    block_indent = Some(indent + 1);
                } else if let Some((_, commands)) = jobs.last_mut() {
                    commands.push(value.to_string());
                }
                break;
            }
        }
    }
    jobs
}

/// GitLab shape: job names are top-level keys, commands under `script:`.
/// Hidden (`.name`) and reserved keys suppress their whole block.
fn gitlab_jobs(text: &str) -> Vec<(String, Vec<String>)> {
    let mut jobs: Vec<(String, Vec<String>)> = Vec::new();
    let mut in_script = false;
    let mut suppressed = true;

    for line in text.lines() {
        if let Some(caps) = GITLAB_JOB.captures(line) {
            let name = caps[1].to_string();
            in_script = false;
            suppressed = name.starts_with('.') || GITLAB_RESERVED.contains(&name.as_str());
            if !suppressed {
                jobs.push((name, Vec::new()));
            }
            continue;
        }
        if suppressed {
            continue;
        }
        let trimmed = line.trim();
        if trimmed == "script:" {
            in_script = true;
            continue;
        }
        if trimmed.starts_with("script:") {
            if let Some((_, commands)) = jobs.last_mut() {
                commands.push(trimmed["script:".len()..].trim().to_string());
            }
            continue;
        }
        if in_script {
            if let Some(item) = trimmed.strip_prefix("- ") {
                if let Some((_, commands)) = jobs.last_mut() {
                    commands.push(item.to_string());
                }
            } else if !trimmed.is_empty() {
                in_script = false;
            }
        }
    }
    jobs
}

fn azure_jobs(text: &str) -> Vec<(String, Vec<String>)> {
    let mut jobs: Vec<(String, Vec<String>)> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = AZURE_JOB.captures(line) {
            jobs.push((caps[1].to_string(), Vec::new()));
            continue;
        }
        let trimmed = line.trim().trim_start_matches("- ");
        if let Some(cmd) = trimmed.strip_prefix("script:") {
            let cmd = cmd.trim();
            if !cmd.is_empty() && cmd != "|" {
                if jobs.is_empty() {
                    jobs.push(("pipeline".to_string(), Vec::new()));
                }
                if let Some((_, commands)) = jobs.last_mut() {
                    commands.push(cmd.to_string());
                }
            }
        }
    }
    jobs
}

/// Flat `script:` list items, for single-job formats.
fn list_commands(text: &str, key: &str) -> Vec<String> {
    let mut commands = Vec::new();
    let mut in_list = false;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed == key {
            in_list = true;
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix(key) {
            commands.push(rest.trim().to_string());
            in_list = false;
            continue;
        }
        if in_list {
            if let Some(item) = trimmed.strip_prefix("- ") {
                commands.push(item.to_string());
            } else if !trimmed.is_empty() && !trimmed.starts_with('-') {
                in_list = false;
            }
        }
    }
    commands
}

fn single_job(name: &str, commands: Vec<String>) -> Vec<(String, Vec<String>)> {
    if commands.is_empty() {
        Vec::new()
    } else {
        vec![(name.to_string(), commands)]
    }
}

/// Plain tokens plus glob expansion.
///
/// `**/*` patterns are not expanded against the disk; representative
/// canonical paths stand in for them. Other globs match the scanned file
/// set, capped at [`GLOB_EXPANSION_CAP`].
fn resolve_refs(ctx: &ExtractContext<'_>, commands: &str) -> Vec<String> {
    let mut refs = pathtokens::extract(commands);

    for glob in pathtokens::extract_globs(commands) {
        if let Some((prefix, rest)) = glob.split_once("**/*") {
            if rest.starts_with('.') && !rest.contains('/') {
                for name in GLOB_REPRESENTATIVES {
                    let path = format!("{prefix}{name}{rest}");
                    if !refs.contains(&path) {
                        refs.push(path);
                    }
                }
            }
            continue;
        }
        let Ok(matcher) = Glob::new(&glob) else {
            continue;
        };
        let matcher = matcher.compile_matcher();
        let mut matched = 0;
        for path in ctx.paths() {
            if matched >= GLOB_EXPANSION_CAP {
                break;
            }
            if matcher.is_match(path) {
                matched += 1;
                if !refs.iter().any(|r| r == path) {
                    refs.push(path.to_string());
                }
            }
        }
    }
    refs
}

#[cfg(test)]
#[path = "ci_tests.rs"]
mod tests;
