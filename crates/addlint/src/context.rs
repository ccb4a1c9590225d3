//! Check context configuration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runtime knobs for one evaluation.
///
/// Cheap to clone; clones share the interrupt flag, so one flag can stop
/// every file of a parallel run.
#[derive(Debug, Clone, Default)]
pub struct CheckContext {
    /// Interrupt flag, checked between top-level items
    pub interrupt: Arc<AtomicBool>,

    /// Whether to log every binary expression visited
    pub trace: bool,
}

impl CheckContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that logs each visited binary expression.
    pub fn with_trace() -> Self {
        Self {
            trace: true,
            ..Default::default()
        }
    }

    /// Context for the CLI's verbosity: verbose runs trace every binary
    /// expression.
    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            Self::with_trace()
        } else {
            Self::new()
        }
    }

    /// Check if evaluation has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request interruption of evaluation.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}
