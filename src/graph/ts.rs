//! TypeScript/JavaScript import graph.

use rayon::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::path_utils;

use super::Graph;
use super::builder::BuildContext;

const IMPORT_WEIGHT: f64 = 1.0;

/// Extensions a specifier may already carry.
const USABLE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".json"];

/// Extensions probed when the specifier has none.
const PROBE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"];

/// Index files probed for directory imports.
const INDEX_PROBES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

pub struct TsGraphBuilder {
    import_from: Regex,
    dynamic_import: Regex,
    require_call: Regex,
    export_from: Regex,
}

impl Default for TsGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TsGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            import_from: Regex::new(r#"import\s+[^'"`;]*?from\s*['"`]([^'"`]+)['"`]"#)
                .expect("valid import-from regex"),
            dynamic_import: Regex::new(r#"import\s*\(\s*['"`]([^'"`]+)['"`]"#)
                .expect("valid dynamic-import regex"),
            require_call: Regex::new(r#"require\s*\(\s*['"`]([^'"`]+)['"`]"#)
                .expect("valid require regex"),
            export_from: Regex::new(r#"export\s+[^'"`;]*?from\s*['"`]([^'"`]+)['"`]"#)
                .expect("valid export-from regex"),
        }
    }

    /// Add import edges for every TS/JS file in the context's bundle.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted.
    pub fn build(&self, ctx: &BuildContext<'_>, graph: &mut Graph) -> Result<()> {
        ctx.checkpoint()?;
        let edges: Vec<(String, String)> = ctx
            .bundle()
            .ts_files
            .par_iter()
            .flat_map_iter(|file| {
                let mut found = Vec::new();
                if let Some(text) = ctx.read(file) {
                    let stripped = strip_js_comments(&text);
                    for specifier in self.specifiers(&stripped) {
                        if let Some(target) = resolve(ctx, file, &specifier) {
                            found.push((file.clone(), target));
                        }
                    }
                }
                found
            })
            .collect();
        ctx.checkpoint()?;

        for (from, to) in edges {
            graph.add_edge(&from, &to, IMPORT_WEIGHT);
        }
        Ok(())
    }

    fn specifiers(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for re in [
            &self.import_from,
            &self.dynamic_import,
            &self.require_call,
            &self.export_from,
        ] {
            for caps in re.captures_iter(text) {
                out.push(caps[1].to_string());
            }
        }
        out
    }
}

/// Resolve an import specifier to a workspace file, or `None` for external
/// and unresolvable imports (silently dropped).
fn resolve(ctx: &BuildContext<'_>, importer: &str, specifier: &str) -> Option<String> {
    if specifier.starts_with("./") || specifier.starts_with("../") {
        return probe(ctx, &path_utils::resolve_relative(importer, specifier));
    }
    if let Some(rooted) = specifier.strip_prefix('/') {
        return probe(ctx, &path_utils::normalize(rooted));
    }
    let view = ctx.bundle().ts_config.as_ref()?;
    for candidate in view.expand(specifier) {
        if let Some(hit) = probe(ctx, &candidate) {
            return Some(hit);
        }
    }
    if let Some(base) = view.base_candidate(specifier) {
        return probe(ctx, &base);
    }
    None
}

/// Extension/index probing for a base path.
fn probe(ctx: &BuildContext<'_>, base: &str) -> Option<String> {
    let ext = path_utils::extension(base);
    if USABLE_EXTENSIONS.contains(&ext.as_str()) {
        return ctx.contains(base).then(|| base.to_string());
    }
    for ext in PROBE_EXTENSIONS {
        let candidate = format!("{base}{ext}");
        if ctx.contains(&candidate) {
            return Some(candidate);
        }
    }
    for index in INDEX_PROBES {
        let candidate = format!("{base}/{index}");
        if ctx.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Strip `//` and `/* */` comments, leaving string and template literals
/// intact. Heuristic: regex-driven extraction tolerates the corner cases.
#[must_use]
pub fn strip_js_comments(text: &str) -> String {
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
            b'"' | b'\'' | b'`' => {
                quote = Some(b);
                out.push(b);
                i += 1;
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
#[path = "ts_tests.rs"]
mod tests;
