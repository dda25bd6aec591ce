//! Manifest extraction: package descriptors seed the bundle.
//!
//! Runs first. Populates the language partitions, `ts_config`,
//! `composer_psr`, `go_modules`, manifest-declared scripts, and entrypoints.

use crate::error::Result;
use crate::path_utils;
use crate::scanner::FileRecord;

use super::types::{EntryPoint, EntryPointKind, Script, SignalBundle};
use super::{ExtractContext, SignalExtractor, jsonc, pathtokens, tsconfig::TsConfigView};

const TS_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"];

pub struct ManifestsExtractor;

impl ManifestsExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for ManifestsExtractor {
    fn name(&self) -> &'static str {
        "manifests"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        partition_languages(ctx, bundle);

        for record in ctx.files() {
            ctx.checkpoint()?;
            match record.basename.as_str() {
                "package.json" => package_json(ctx, bundle, record),
                "composer.json" => composer_json(ctx, bundle, record),
                "go.mod" => go_mod(ctx, bundle, record),
                "wails.json" => bundle.push_entrypoint(EntryPoint {
                    path: record.path.clone(),
                    kind: EntryPointKind::Backend,
                    hints: vec!["wails".to_string()],
                }),
                "Cargo.toml" => cargo_toml(ctx, bundle, record),
                "pyproject.toml" => pyproject_toml(ctx, bundle, record),
                name if name.starts_with("tsconfig") && name.ends_with(".json") => {
                    load_tsconfig(ctx, bundle, record);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn partition_languages(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) {
    for record in ctx.files() {
        if TS_EXTENSIONS.contains(&record.extension.as_str()) {
            bundle.ts_files.push(record.path.clone());
        } else if record.extension == ".go" {
            bundle.go_files.push(record.path.clone());
        } else if record.extension == ".php" {
            bundle.php_files.push(record.path.clone());
        }
    }
}

fn load_tsconfig(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle, record: &FileRecord) {
    if bundle.ts_config.is_some() {
        return;
    }
    let Some(text) = ctx.read(&record.path) else {
        return;
    };
    let Some(value) = jsonc::parse_lenient(&text) else {
        return;
    };
    bundle.ts_config = Some(TsConfigView::from_json(
        &value,
        path_utils::parent(&record.path),
    ));
}

fn package_json(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle, record: &FileRecord) {
    let Some(value) = ctx.read(&record.path).and_then(|t| jsonc::parse_lenient(&t)) else {
        return;
    };
    let dir = path_utils::parent(&record.path).to_string();

    let mut has_vite_script = false;
    if let Some(scripts) = value["scripts"].as_object() {
        for (name, cmd) in scripts {
            let Some(cmd) = cmd.as_str() else { continue };
            if (name == "dev" || name == "start") && cmd.contains("vite") {
                has_vite_script = true;
            }
            bundle.scripts.push(Script {
                name: name.clone(),
                source: "npm".to_string(),
                cmd: cmd.to_string(),
                paths: pathtokens::extract(cmd),
            });
        }
    }

    let deps = declared_dependencies(&value);

    if let Some(main) = value["main"].as_str() {
        let path = join(&dir, main);
        if ctx.contains(&path) {
            bundle.push_entrypoint(EntryPoint {
                kind: classify_entrypoint(&deps, &path),
                path,
                hints: vec!["package-main".to_string()],
            });
        }
    }

    if has_vite_script {
        bundle.push_entrypoint(EntryPoint {
            path: join(&dir, "src/main.ts"),
            kind: EntryPointKind::Frontend,
            hints: vec!["vite".to_string()],
        });
    }
}

fn declared_dependencies(value: &serde_json::Value) -> Vec<String> {
    let mut deps = Vec::new();
    for key in ["dependencies", "devDependencies"] {
        if let Some(map) = value[key].as_object() {
            deps.extend(map.keys().cloned());
        }
    }
    deps
}

/// Entry kind from declared dependencies, falling back to filename cues.
fn classify_entrypoint(deps: &[String], path: &str) -> EntryPointKind {
    let has = |name: &str| deps.iter().any(|d| d == name);
    if has("react") || has("vue") || has("next") {
        return EntryPointKind::Frontend;
    }
    if has("express") {
        return EntryPointKind::Backend;
    }
    let name = path_utils::basename(path);
    if name.contains("server") {
        EntryPointKind::Backend
    } else if name.contains("frontend") {
        EntryPointKind::Frontend
    } else {
        EntryPointKind::Backend
    }
}

fn composer_json(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle, record: &FileRecord) {
    let Some(value) = ctx.read(&record.path).and_then(|t| jsonc::parse_lenient(&t)) else {
        return;
    };
    let dir = path_utils::parent(&record.path).to_string();

    for autoload_key in ["autoload", "autoload-dev"] {
        if let Some(map) = value[autoload_key]["psr-4"].as_object() {
            for (namespace, target) in map {
                let Some(target_dir) = psr4_target(target) else {
                    continue;
                };
                let mut namespace = namespace.clone();
                if !namespace.ends_with('\\') {
                    namespace.push('\\');
                }
                bundle
                    .composer_psr
                    .insert(namespace, join(&dir, &target_dir));
            }
        }
        if let Some(excludes) = value[autoload_key]["exclude-from-classmap"].as_array() {
            for entry in excludes.iter().filter_map(|e| e.as_str()) {
                bundle.composer_classmap_excludes.push(join(&dir, entry));
            }
        }
    }

    if let Some(scripts) = value["scripts"].as_object() {
        for (name, cmd) in scripts {
            let cmd = match cmd {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(parts) => parts
                    .iter()
                    .filter_map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(" && "),
                _ => continue,
            };
            bundle.scripts.push(Script {
                name: name.clone(),
                source: "composer".to_string(),
                paths: pathtokens::extract(&cmd),
                cmd,
            });
        }
    }

    for laravel_entry in ["artisan", "public/index.php"] {
        let path = join(&dir, laravel_entry);
        if ctx.contains(&path) {
            bundle.push_entrypoint(EntryPoint {
                path,
                kind: EntryPointKind::Backend,
                hints: vec!["laravel".to_string()],
            });
        }
    }
}

/// PSR-4 targets are a string or an array of strings; the first entry wins.
fn psr4_target(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(arr) => arr.first().and_then(|v| v.as_str()).map(String::from),
        _ => None,
    }
}

fn go_mod(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle, record: &FileRecord) {
    let dir = path_utils::parent(&record.path).to_string();

    if let Some(text) = ctx.read(&record.path) {
        for line in text.lines() {
            if let Some(module) = line.trim().strip_prefix("module ") {
                let module = module.trim();
                if !module.is_empty() {
                    bundle.go_modules.insert(dir.clone(), module.to_string());
                }
                break;
            }
        }
    }

    let main = join(&dir, "main.go");
    if ctx.contains(&main) {
        bundle.push_entrypoint(EntryPoint {
            path: main.clone(),
            kind: EntryPointKind::Backend,
            hints: vec!["go-main".to_string()],
        });
    }

    let cmd_prefix = join(&dir, "cmd");
    for path in ctx.paths() {
        if path_utils::is_under(path, &cmd_prefix)
            && path_utils::basename(path) == "main.go"
            && path != main
        {
            bundle.push_entrypoint(EntryPoint {
                path: path.to_string(),
                kind: EntryPointKind::Cli,
                hints: vec!["go-cmd".to_string()],
            });
        }
    }
}

fn cargo_toml(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle, record: &FileRecord) {
    let Some(text) = ctx.read(&record.path) else {
        return;
    };
    if text.parse::<toml::Value>().is_err() {
        return;
    }
    let dir = path_utils::parent(&record.path).to_string();
    let main = join(&dir, "src/main.rs");
    if ctx.contains(&main) {
        bundle.push_entrypoint(EntryPoint {
            path: main,
            kind: EntryPointKind::Cli,
            hints: vec!["cargo-bin".to_string()],
        });
    }
}

fn pyproject_toml(ctx: &ExtractContext<'_>, bundle: &mut SignalBundle, record: &FileRecord) {
    let Some(text) = ctx.read(&record.path) else {
        return;
    };
    let Ok(value) = text.parse::<toml::Value>() else {
        return;
    };
    let dir = path_utils::parent(&record.path).to_string();

    if let Some(scripts) = value
        .get("project")
        .and_then(|p| p.get("scripts"))
        .and_then(toml::Value::as_table)
    {
        for (name, target) in scripts {
            let Some(target) = target.as_str() else {
                continue;
            };
            bundle.scripts.push(Script {
                name: name.clone(),
                source: "pyproject".to_string(),
                cmd: target.to_string(),
                paths: Vec::new(),
            });
        }
    }

    let manage = join(&dir, "manage.py");
    if ctx.contains(&manage) {
        bundle.push_entrypoint(EntryPoint {
            path: manage,
            kind: EntryPointKind::Backend,
            hints: vec!["django".to_string()],
        });
    }
}

fn join(dir: &str, rel: &str) -> String {
    if dir.is_empty() {
        path_utils::normalize(rel)
    } else {
        path_utils::normalize(&format!("{dir}/{rel}"))
    }
}

#[cfg(test)]
#[path = "manifests_tests.rs"]
mod tests;
