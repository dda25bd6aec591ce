//! Cooperative cancellation threaded through the pipeline.
//!
//! Stages call [`CancelToken::checkpoint`] between files and between stages.
//! Cancellation aborts the run cleanly: no artifacts are written and any
//! tempfiles are discarded by their RAII guards.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ProfilerError, Result};

/// Cloneable cancellation flag shared by all pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Safe to call from any thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns the canonical cancellation error if cancellation was requested.
    ///
    /// # Errors
    /// Returns `ProfilerError::Cancelled` when the token has been cancelled.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ProfilerError::Cancelled)
        } else {
            Ok(())
        }
    }
}
