//! Human-readable `rules.md` rendering.
//!
//! Section headers are stable so downstream tooling can extract them with
//! plain text processing.

use std::fmt::Write;

use crate::profile::Profile;
use crate::signals::EntryPointKind;

const KEY_FILES_LIMIT: usize = 20;

/// Render the markdown summary of a profile.
#[must_use]
#[allow(clippy::too_many_lines)] // linear section-by-section renderer
pub fn render_rules(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str("# Project Profile\n\n");
    let _ = writeln!(
        out,
        "Generated for `{}`. Edit nothing here; re-run the profiler instead.",
        profile.workspace_root
    );
    out.push('\n');

    out.push_str("## Languages\n\n");
    if profile.languages.is_empty() {
        out.push_str("No supported languages detected.\n");
    } else {
        for language in &profile.languages {
            let _ = writeln!(out, "- {language}");
        }
    }
    out.push('\n');

    out.push_str("## Entrypoints\n\n");
    if profile.entrypoints.is_empty() {
        out.push_str("None detected.\n");
    } else {
        for entry in &profile.entrypoints {
            let kind = match entry.kind {
                EntryPointKind::Backend => "backend",
                EntryPointKind::Frontend => "frontend",
                EntryPointKind::Cli => "cli",
                EntryPointKind::Infra => "infra",
            };
            if entry.hints.is_empty() {
                let _ = writeln!(out, "- `{}` ({kind})", entry.path);
            } else {
                let _ = writeln!(out, "- `{}` ({kind}; {})", entry.path, entry.hints.join(", "));
            }
        }
    }
    out.push('\n');

    out.push_str("## Commands\n\n");
    if profile.scripts.is_empty() {
        out.push_str("None detected.\n");
    } else {
        for script in &profile.scripts {
            let _ = writeln!(out, "- **{}** ({}): `{}`", script.name, script.source, script.cmd);
        }
    }
    out.push('\n');

    out.push_str("## Tools & Configuration\n\n");
    if profile.configs.is_empty() {
        out.push_str("None detected.\n");
    } else {
        for config in &profile.configs {
            let _ = writeln!(out, "- {}: `{}`", config.tool, config.path);
        }
    }
    out.push('\n');

    out.push_str("## Code Generation\n\n");
    if profile.codegen.is_empty() {
        out.push_str("None detected.\n");
    } else {
        for spec in &profile.codegen {
            let _ = writeln!(out, "- {} ({} file(s))", spec.tool, spec.paths.len());
        }
    }
    out.push('\n');

    out.push_str("## CI/CD\n\n");
    if profile.ci.is_empty() {
        out.push_str("None detected.\n");
    } else {
        for ci in &profile.ci {
            if ci.jobs.is_empty() {
                let _ = writeln!(out, "- `{}`", ci.path);
            } else {
                let _ = writeln!(out, "- `{}`: {}", ci.path, ci.jobs.join(", "));
            }
        }
    }
    out.push('\n');

    out.push_str("## Generated/Ignored Files\n\n");
    let generated: Vec<&str> = profile
        .important_files
        .iter()
        .filter(|f| f.is_generated)
        .map(|f| f.path.as_str())
        .collect();
    if generated.is_empty() {
        out.push_str("No generated files ranked.\n");
    } else {
        out.push_str("Ranked but de-prioritized as generated:\n\n");
        for path in generated {
            let _ = writeln!(out, "- `{path}`");
        }
    }
    out.push('\n');

    out.push_str("## Key Files\n\n");
    if profile.important_files.is_empty() {
        out.push_str("None ranked.\n");
    } else {
        for file in profile.important_files.iter().take(KEY_FILES_LIMIT) {
            if file.reasons.is_empty() {
                let _ = writeln!(out, "- `{}` ({:.3})", file.path, file.score);
            } else {
                let _ = writeln!(
                    out,
                    "- `{}` ({:.3}; {})",
                    file.path,
                    file.score,
                    file.reasons.join(", ")
                );
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
