use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for the scan/analysis phases.
///
/// Disabled in quiet mode or when stderr is not a TTY; output goes to
/// stderr so stdout stays machine-readable.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl ScanProgress {
    /// Creates a spinner-style progress indicator.
    ///
    /// # Panics
    /// Panics if the progress template is invalid; the template is a
    /// compile-time constant.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} ({pos} files)")
                    .expect("valid template"),
            );
            pb
        };
        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set_stage(&self, stage: &str) {
        self.progress_bar.set_message(stage.to_string());
    }

    /// Thread-safe increment for use from parallel workers.
    pub fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
