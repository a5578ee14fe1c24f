//! Vantage point management.
//!
//! A vantage point is a simulated network location (a VPN relay in a given
//! country) the probes run from. This module provides:
//! - The [`VantageProvider`] capability trait the orchestrator drives
//! - The Mullvad CLI implementation of that trait
//! - [`ResolverBinding`], the owned session value for a bound custom resolver
//!
//! The active location and the active DNS resolver are host-wide resources:
//! exactly one of each exists at a time, so every switch and bind is ordered
//! by the orchestrator and never overlaps another.

mod binding;
mod mullvad;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::error_handling::{ResolverBindError, VantageSwitchError};

// Re-export public API
pub use binding::ResolverBinding;
pub use mullvad::MullvadProvider;

/// Capability interface of a vantage backend.
///
/// The orchestrator depends only on this trait; providers are
/// interchangeable. Locations are keyed by a short location code and map to
/// the provider's relay identifiers. The mapping is returned sorted so runs
/// visit locations in a reproducible order.
#[async_trait]
pub trait VantageProvider: Send + Sync {
    /// Establishes the provider tunnel. Called once before probing; failure
    /// is fatal to the run.
    async fn connect(&self) -> Result<(), VantageSwitchError>;

    /// Enumerates available locations as `location code -> relay
    /// identifiers`.
    async fn list_locations(&self) -> Result<BTreeMap<String, Vec<String>>, VantageSwitchError>;

    /// Switches to the given location and blocks until the provider confirms
    /// it. Returns the vantage's own source address(es) as reported by the
    /// provider.
    async fn set_location(&self, code: &str) -> Result<Vec<String>, VantageSwitchError>;

    /// Binds a custom DNS resolver for the whole vantage.
    async fn set_custom_resolver(&self, addr: IpAddr) -> Result<(), ResolverBindError>;

    /// Restores the provider's default DNS resolver.
    async fn set_default_resolver(&self) -> Result<(), ResolverBindError>;

    /// Polls the provider status until it reports the expected location, or
    /// the confirmation deadline expires. Returns the reported source
    /// address(es).
    async fn check_status(&self, expected: &str) -> Result<Vec<String>, VantageSwitchError>;
}
