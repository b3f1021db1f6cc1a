//! Ctrl+C bookkeeping
//!
//! The process-wide Ctrl+C handler only bumps a counter. The pipeline and
//! the supervisor poll it, so each interrupt is acted on exactly once by
//! whoever is in charge at that moment.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared count of interrupts received by this process
#[derive(Debug, Clone, Default)]
pub struct Interrupts {
    count: Arc<AtomicUsize>,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the process's Ctrl+C into this counter. Can only be done once
    /// per process.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let counter = self.clone();
        ctrlc::set_handler(move || counter.raise())
    }

    /// Record one interrupt.
    pub fn raise(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Total interrupts received so far
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn any(&self) -> bool {
        self.count() > 0
    }
}
