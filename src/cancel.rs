//! Cooperative cancellation
//!
//! A single process-wide flag, set asynchronously by an external observer
//! (typically a global hotkey listener) and polled by the drawing worker
//! between discrete pointer actions. Cancellation is not an interrupt: the
//! in-flight atomic action completes before the flag is honored, and there
//! are no resume semantics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable handle to a shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert the flag. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
