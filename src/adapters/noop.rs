use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::domain::ports::NativePrinter;
use crate::utils::error::LinkError;

/// `NativePrinter` that runs no native code and only counts calls.
#[derive(Debug, Default)]
pub struct NoopPrinter {
    calls: AtomicUsize,
}

impl NoopPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NativePrinter for NoopPrinter {
    fn print(&self) -> Result<(), LinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("Skipped native print (no-op printer)");
        Ok(())
    }
}
