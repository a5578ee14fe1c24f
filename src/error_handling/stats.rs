//! Probe statistics tracking.
//!
//! Thread-safe counters for the degradable failures of a run, printed in the
//! end-of-run summary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe statistics tracker for one probing run.
///
/// All counters are initialized to zero on creation. The tracker can be
/// shared across tasks; the per-binding fetch fan-out increments it
/// concurrently.
pub struct ProbeStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ProbeStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        ProbeStats { errors }
    }

    /// Increments the counter for `error`.
    pub fn increment(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            // All variants are inserted in new(); a miss is a bug there.
            log::error!("no counter initialized for {error:?}");
        }
    }

    /// Returns the count for one error type.
    pub fn count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Returns the total across all error types.
    pub fn total(&self) -> usize {
        self.errors
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Logs a summary of all non-zero counters.
    pub fn log_summary(&self) {
        let total = self.total();
        if total == 0 {
            log::info!("Run completed without degraded steps");
            return;
        }
        log::info!("Degraded steps during run: {total}");
        for error in ErrorType::iter() {
            let count = self.count(error);
            if count > 0 {
                log::info!("  {count} {error}");
            }
        }
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}
