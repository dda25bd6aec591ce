//! Config-file tagging.
//!
//! Every `is_config` record lands in `configs[]` with a detected tool;
//! docker configs double as infrastructure entrypoints.

use crate::error::Result;

use super::types::{ConfigFile, EntryPoint, EntryPointKind, SignalBundle};
use super::{ExtractContext, SignalExtractor};

/// Exact basename → tool, consulted before the prefix rules.
const TOOL_BY_BASENAME: &[(&str, &str)] = &[
    ("package.json", "npm"),
    ("package-lock.json", "npm"),
    ("yarn.lock", "yarn"),
    ("pnpm-lock.yaml", "pnpm"),
    ("composer.json", "composer"),
    ("composer.lock", "composer"),
    ("go.mod", "go"),
    ("go.sum", "go"),
    ("cargo.toml", "cargo"),
    ("cargo.lock", "cargo"),
    ("pyproject.toml", "python"),
    ("poetry.lock", "python"),
    ("requirements.txt", "python"),
    ("wails.json", "wails"),
    ("jsconfig.json", "typescript"),
    ("dockerfile", "docker"),
    ("docker-compose.yml", "docker-compose"),
    ("docker-compose.yaml", "docker-compose"),
    ("compose.yml", "docker-compose"),
    ("compose.yaml", "docker-compose"),
    ("phpunit.xml", "phpunit"),
    (".gitignore", "git"),
    (".gitattributes", "git"),
    (".dockerignore", "docker"),
    (".editorconfig", "editorconfig"),
    (".env.example", "env"),
    (".babelrc", "babel"),
];

/// Basename prefix → tool, for `<tool>.config.*` and rc variants.
const TOOL_BY_PREFIX: &[(&str, &str)] = &[
    ("tsconfig", "typescript"),
    ("vite.config", "vite"),
    ("webpack.config", "webpack"),
    ("rollup.config", "rollup"),
    ("next.config", "next"),
    ("nuxt.config", "nuxt"),
    ("svelte.config", "svelte"),
    ("tailwind.config", "tailwind"),
    ("postcss.config", "postcss"),
    ("jest.config", "jest"),
    ("vitest.config", "vitest"),
    ("babel.config", "babel"),
    (".babelrc", "babel"),
    ("eslint.config", "eslint"),
    (".eslintrc", "eslint"),
    ("prettier.config", "prettier"),
    (".prettierrc", "prettier"),
];

pub struct ConfigsExtractor;

impl ConfigsExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for ConfigsExtractor {
    fn name(&self) -> &'static str {
        "configs"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        for record in ctx.files() {
            ctx.checkpoint()?;
            if !record.is_config {
                continue;
            }
            let tool = detect_tool(&record.basename);
            if tool == "docker" || tool == "docker-compose" {
                bundle.push_entrypoint(EntryPoint {
                    path: record.path.clone(),
                    kind: EntryPointKind::Infra,
                    hints: vec![tool.clone()],
                });
            }
            bundle.configs.push(ConfigFile {
                tool,
                path: record.path.clone(),
            });
        }
        Ok(())
    }
}

fn detect_tool(basename: &str) -> String {
    let lower = basename.to_ascii_lowercase();
    for (name, tool) in TOOL_BY_BASENAME {
        if lower == *name {
            return (*tool).to_string();
        }
    }
    for (prefix, tool) in TOOL_BY_PREFIX {
        if lower.starts_with(prefix) {
            return (*tool).to_string();
        }
    }
    // Fallback: `<tool>.config.js`, `<tool>rc`, anything with "config" in it.
    let stem = lower.trim_start_matches('.');
    if let Some(tool) = stem.strip_suffix(".rc").or_else(|| stem.strip_suffix("rc")) {
        if !tool.is_empty() && !tool.contains('.') {
            return tool.to_string();
        }
    }
    stem.split('.').next().map_or_else(
        || "config".to_string(),
        |first| {
            if first.is_empty() {
                "config".to_string()
            } else {
                first.to_string()
            }
        },
    )
}

#[cfg(test)]
#[path = "configs_tests.rs"]
mod tests;
