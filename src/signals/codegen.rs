//! Code-generation spec detection.
//!
//! Multiple files per tool coalesce into a single `CodegenSpec`.

use indexmap::IndexMap;

use crate::error::Result;
use crate::path_utils;
use crate::scanner::FileRecord;

use super::types::{CodegenSpec, SignalBundle};
use super::{ExtractContext, SignalExtractor};

pub struct CodegenExtractor;

impl CodegenExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SignalExtractor for CodegenExtractor {
    fn name(&self) -> &'static str {
        "codegen"
    }

    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()> {
        let mut by_tool: IndexMap<&'static str, Vec<String>> = IndexMap::new();
        for record in ctx.files() {
            ctx.checkpoint()?;
            if let Some(tool) = detect_tool(record) {
                by_tool.entry(tool).or_default().push(record.path.clone());
            }
        }
        for (tool, paths) in by_tool {
            bundle.codegen.push(CodegenSpec {
                tool: tool.to_string(),
                paths,
            });
        }
        Ok(())
    }
}

fn detect_tool(record: &FileRecord) -> Option<&'static str> {
    let lower = record.basename.to_ascii_lowercase();
    let ext = record.extension.as_str();

    if ext == ".proto" {
        return Some("protobuf");
    }
    if ext == ".prisma" {
        return Some("prisma");
    }
    if matches!(lower.as_str(), "buf.yaml" | "buf.gen.yaml" | "buf.work.yaml") {
        return Some("buf");
    }
    if matches!(lower.as_str(), "sqlc.yaml" | "sqlc.json") {
        return Some("sqlc");
    }
    if (lower.contains("openapi") || lower.contains("swagger"))
        && matches!(ext, ".json" | ".yml" | ".yaml")
    {
        return Some("openapi");
    }
    if lower.starts_with("codegen.") && matches!(ext, ".yml" | ".yaml" | ".ts" | ".json") {
        return Some("graphql-codegen");
    }
    if matches!(ext, ".graphql" | ".gql") {
        return Some("graphql");
    }
    if lower == "generate.go" {
        return Some("go-generate");
    }
    if path_utils::has_segment(&record.path, "migrations")
        || path_utils::has_segment(&record.path, "migrate")
    {
        return Some("migrations");
    }
    None
}

#[cfg(test)]
#[path = "codegen_tests.rs"]
mod tests;
