//! Cross-cutting edges: script/CI references and documentation mentions.

use crate::error::Result;

use super::builder::BuildContext;
use super::{Graph, INTRINSIC_LOOP_WEIGHT};

const REF_WEIGHT: f64 = 1.0;

pub struct GenericGraphBuilder;

impl GenericGraphBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Add virtual-source edges for script/CI refs and intrinsic-importance
    /// self-loops for doc mentions.
    ///
    /// Virtual vertices (`__script:<job>`, `__ci:<job>`) exist only during
    /// construction; finalize removes them once their targets have been
    /// recorded as vertices. Referenced paths that are not scanned files
    /// are dropped here rather than becoming phantom vertices.
    ///
    /// # Errors
    /// Returns `Cancelled` when the run is aborted.
    pub fn build(&self, ctx: &BuildContext<'_>, graph: &mut Graph) -> Result<()> {
        ctx.checkpoint()?;
        let bundle = ctx.bundle();

        for (job, paths) in &bundle.script_refs {
            let source = format!("__script:{job}");
            for path in paths.iter().filter(|p| ctx.contains(p)) {
                graph.add_edge(&source, path, REF_WEIGHT);
            }
        }
        for (job, paths) in &bundle.ci_refs {
            let source = format!("__ci:{job}");
            for path in paths.iter().filter(|p| ctx.contains(p)) {
                graph.add_edge(&source, path, REF_WEIGHT);
            }
        }
        for path in bundle.doc_refs.iter().filter(|p| ctx.contains(p)) {
            graph.add_edge(path, path, INTRINSIC_LOOP_WEIGHT);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "generic_tests.rs"]
mod tests;
