//! Progress reporting for UI percentage display.

use std::sync::Arc;

/// Bytes processed so far against the declared total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: u64,
    pub total: u64,
}

impl Progress {
    /// Completion in `0.0..=1.0`. An empty total counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Callback invoked after every processed chunk.
///
/// `Arc` so one callback can follow a host across several sessions, and
/// `Send + Sync` so it can run on the worker thread.
pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

#[inline]
pub(crate) fn report(progress: Option<&ProgressFn>, processed: u64, total: u64) {
    if let Some(cb) = progress {
        cb(Progress { processed, total });
    }
}
