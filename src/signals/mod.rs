mod ci;
mod codegen;
mod configs;
mod docs;
mod jsonc;
mod manifests;
mod pathtokens;
mod routes;
mod scripts;
mod tsconfig;
mod types;

pub use tsconfig::{PathPattern, TsConfigView};
pub use types::{
    CiConfig, CodegenSpec, ConfigFile, EntryPoint, EntryPointKind, RouteKind, RouteOrService,
    Script, SignalBundle,
};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::scanner::FileRecord;

/// Read-only view of the workspace shared by all extractors.
pub struct ExtractContext<'a> {
    root: &'a Path,
    files: &'a [FileRecord],
    paths: HashSet<&'a str>,
    cancel: &'a CancelToken,
}

impl<'a> ExtractContext<'a> {
    #[must_use]
    pub fn new(root: &'a Path, files: &'a [FileRecord], cancel: &'a CancelToken) -> Self {
        let paths = files.iter().map(|f| f.path.as_str()).collect();
        Self {
            root,
            files,
            paths,
            cancel,
        }
    }

    #[must_use]
    pub const fn files(&self) -> &'a [FileRecord] {
        self.files
    }

    /// Exact-string membership test against the scanned file set.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// All scanned paths, in scan (sorted) order.
    pub fn paths(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// Read a workspace-relative file, swallowing errors.
    #[must_use]
    pub fn read(&self, path: &str) -> Option<String> {
        fs::read_to_string(self.root.join(path)).ok()
    }

    /// Cooperative cancellation check.
    ///
    /// # Errors
    /// Returns the canonical cancellation error when the token has fired.
    pub fn checkpoint(&self) -> Result<()> {
        self.cancel.checkpoint()
    }
}

/// One specialist extractor mutating the shared [`SignalBundle`].
pub trait SignalExtractor {
    fn name(&self) -> &'static str;

    /// Extract facts into the bundle. Per-file problems are swallowed; the
    /// only error this surfaces is cancellation.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted.
    fn extract(&self, ctx: &ExtractContext<'_>, bundle: &mut SignalBundle) -> Result<()>;
}

/// Runs the seven extractors in their fixed order.
///
/// Order matters: manifests seed `ts_config`, `composer_psr`, and the
/// language partitions that later extractors and the graph builders consume.
pub struct SignalCollector {
    extractors: Vec<Box<dyn SignalExtractor>>,
}

impl Default for SignalCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(manifests::ManifestsExtractor::new()),
                Box::new(scripts::ScriptsExtractor::new()),
                Box::new(ci::CiExtractor::new()),
                Box::new(docs::DocsExtractor::new()),
                Box::new(configs::ConfigsExtractor::new()),
                Box::new(codegen::CodegenExtractor::new()),
                Box::new(routes::RoutesExtractor::new()),
            ],
        }
    }

    /// Collect all signals for the scanned file list.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted; everything else is
    /// partial-tolerant.
    pub fn collect(
        &self,
        root: &Path,
        files: &[FileRecord],
        cancel: &CancelToken,
    ) -> Result<SignalBundle> {
        let ctx = ExtractContext::new(root, files, cancel);
        let mut bundle = SignalBundle::default();
        for extractor in &self.extractors {
            ctx.checkpoint()?;
            extractor.extract(&ctx, &mut bundle)?;
        }
        Ok(bundle)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
