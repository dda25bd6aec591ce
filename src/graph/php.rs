//! PHP reference graph via PSR-4 resolution, with Laravel-aware weak edges.

use rayon::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::path_utils;
use crate::signals::SignalBundle;

use super::Graph;
use super::builder::BuildContext;

const REFERENCE_WEIGHT: f64 = 1.0;
const ROUTES_TO_CONTROLLERS: f64 = 0.6;
const ROUTES_TO_MODELS: f64 = 0.3;
const MODELS_TO_MIGRATIONS: f64 = 0.4;
const MODELS_TO_POLICIES: f64 = 0.4;
const PROVIDER_TO_DOMAIN: f64 = 0.2;

/// Common global classes that never resolve to workspace files.
const STDLIB_CLASSES: &[&str] = &[
    "DateTime",
    "DateTimeImmutable",
    "DateInterval",
    "Exception",
    "RuntimeException",
    "InvalidArgumentException",
    "LogicException",
    "Throwable",
    "ArrayAccess",
    "ArrayObject",
    "Countable",
    "Iterator",
    "IteratorAggregate",
    "Traversable",
    "Generator",
    "Closure",
    "stdClass",
    "SplQueue",
    "SplStack",
    "JsonSerializable",
    "Stringable",
];

pub struct PhpGraphBuilder {
    use_statement: Regex,
    instantiation: Regex,
    static_access: Regex,
    instance_check: Regex,
    type_hint: Regex,
    return_hint: Regex,
}

impl Default for PhpGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PhpGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            use_statement: Regex::new(
                r"(?m)^\s*use\s+(?:function\s+|const\s+)?([A-Za-z_\\][A-Za-z0-9_\\]*)(?:\s+as\s+\w+)?\s*;",
            )
            .expect("valid use-statement regex"),
            instantiation: Regex::new(r"new\s+\\?([A-Za-z_][A-Za-z0-9_\\]*)\s*\(")
                .expect("valid instantiation regex"),
            static_access: Regex::new(r"\\?([A-Za-z_][A-Za-z0-9_\\]*)::[A-Za-z_$]")
                .expect("valid static-access regex"),
            instance_check: Regex::new(r"instanceof\s+\\?([A-Za-z_][A-Za-z0-9_\\]*)")
                .expect("valid instanceof regex"),
            type_hint: Regex::new(r"\(\s*\\?([A-Z][A-Za-z0-9_\\]*)\s+\$")
                .expect("valid type-hint regex"),
            return_hint: Regex::new(r":\s*\??\s*\\?([A-Z][A-Za-z0-9_\\]*)\s*[\{;]")
                .expect("valid return-hint regex"),
        }
    }

    /// Add PSR-4 reference edges plus Laravel framework edges.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted.
    pub fn build(&self, ctx: &BuildContext<'_>, graph: &mut Graph) -> Result<()> {
        let bundle = ctx.bundle();
        if bundle.php_files.is_empty() {
            return Ok(());
        }
        ctx.checkpoint()?;

        let edges: Vec<(String, String)> = bundle
            .php_files
            .par_iter()
            .flat_map_iter(|file| {
                let mut found = Vec::new();
                if let Some(text) = ctx.read(file) {
                    let stripped = strip_php_comments(&text);
                    for class in self.class_references(&stripped) {
                        if let Some(target) = resolve_class(ctx, bundle, &class)
                            && target != *file
                        {
                            found.push((file.clone(), target));
                        }
                    }
                }
                found
            })
            .collect();
        ctx.checkpoint()?;

        for (from, to) in edges {
            graph.add_edge(&from, &to, REFERENCE_WEIGHT);
        }

        add_laravel_edges(bundle, graph);
        Ok(())
    }

    fn class_references(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for re in [
            &self.use_statement,
            &self.instantiation,
            &self.static_access,
            &self.instance_check,
            &self.type_hint,
            &self.return_hint,
        ] {
            for caps in re.captures_iter(text) {
                let class = caps[1].trim_start_matches('\\');
                if !out.iter().any(|c| c == class) {
                    out.push(class.to_string());
                }
            }
        }
        out
    }
}

/// Resolve a fully-qualified class name through the PSR-4 table.
fn resolve_class(ctx: &BuildContext<'_>, bundle: &SignalBundle, class: &str) -> Option<String> {
    if STDLIB_CLASSES.contains(&class) || !class.contains('\\') {
        return None;
    }
    for (namespace, dir) in &bundle.composer_psr {
        let Some(rest) = class.strip_prefix(namespace.as_str()) else {
            continue;
        };
        let rel = rest.replace('\\', "/");
        let candidate = if dir.is_empty() {
            format!("{rel}.php")
        } else {
            format!("{dir}/{rel}.php")
        };
        let candidate = path_utils::normalize(&candidate);
        if ctx.contains(&candidate) && !is_classmap_excluded(bundle, &candidate) {
            return Some(candidate);
        }
    }
    None
}

fn is_classmap_excluded(bundle: &SignalBundle, path: &str) -> bool {
    bundle.composer_classmap_excludes.iter().any(|entry| {
        let entry = entry.trim_matches('/');
        !entry.is_empty() && (path_utils::is_under(path, entry) || path.contains(entry))
    })
}

/// Framework-structure edges between route files, controllers, models,
/// migrations, and policies.
fn add_laravel_edges(bundle: &SignalBundle, graph: &mut Graph) {
    let routes: Vec<&String> = bundle
        .php_files
        .iter()
        .filter(|p| path_utils::has_segment(p, "routes"))
        .collect();
    let controllers: Vec<&String> = bundle
        .php_files
        .iter()
        .filter(|p| path_utils::has_segment(p, "Controllers"))
        .collect();
    let models: Vec<&String> = bundle
        .php_files
        .iter()
        .filter(|p| path_utils::has_segment(p, "Models"))
        .collect();
    let migrations: Vec<&String> = bundle
        .php_files
        .iter()
        .filter(|p| path_utils::has_segment(p, "migrations"))
        .collect();
    let policies: Vec<&String> = bundle
        .php_files
        .iter()
        .filter(|p| path_utils::has_segment(p, "Policies"))
        .collect();
    let providers: Vec<&String> = bundle
        .php_files
        .iter()
        .filter(|p| path_utils::basename(p) == "RouteServiceProvider.php")
        .collect();

    for route in &routes {
        for controller in &controllers {
            graph.add_edge(route, controller, ROUTES_TO_CONTROLLERS);
        }
        for model in &models {
            graph.add_edge(route, model, ROUTES_TO_MODELS);
        }
    }
    for model in &models {
        for migration in &migrations {
            graph.add_edge(model, migration, MODELS_TO_MIGRATIONS);
            graph.add_edge(migration, model, MODELS_TO_MIGRATIONS);
        }
        for policy in &policies {
            graph.add_edge(model, policy, MODELS_TO_POLICIES);
        }
    }
    for provider in &providers {
        for model in &models {
            graph.add_edge(provider, model, PROVIDER_TO_DOMAIN);
        }
        for policy in &policies {
            graph.add_edge(provider, policy, PROVIDER_TO_DOMAIN);
        }
    }
}

/// Strip `//`, `#`, and `/* */` comments outside string literals.
#[must_use]
pub fn strip_php_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => {
                quote = Some(b);
                out.push(b);
                i += 1;
            }
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                out.push(b' ');
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[path = "php_tests.rs"]
mod tests;
