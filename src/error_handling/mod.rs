//! Error taxonomy and probe statistics.
//!
//! This module provides:
//! - The error types of the pipeline, grouped by how they propagate
//! - Run statistics tracking (counts per error type)
//!
//! Propagation policy: vantage-switch failures are run-fatal (later probes
//! would be mislabeled); resolver-bind failures abort the current iteration;
//! resolution, fetch and evidence failures degrade a single step or record.
//! A run always completes and reports whatever records it produced.

mod stats;
mod types;

// Re-export public API
pub use stats::ProbeStats;
pub use types::{
    ErrorType, EvidenceCaptureError, FetchError, InitializationError, ResolutionError,
    ResolverBindError, VantageSwitchError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_probe_stats_initialization() {
        let stats = ProbeStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.count(error_type), 0);
        }
    }

    #[test]
    fn test_probe_stats_increment() {
        let stats = ProbeStats::new();
        stats.increment(ErrorType::FetchTransport);
        stats.increment(ErrorType::FetchTransport);
        stats.increment(ErrorType::ResolverBind);
        assert_eq!(stats.count(ErrorType::FetchTransport), 2);
        assert_eq!(stats.count(ErrorType::ResolverBind), 1);
        assert_eq!(stats.total(), 3);
    }
}
