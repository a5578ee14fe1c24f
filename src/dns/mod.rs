//! Name resolution for the probing pipeline.
//!
//! This module provides:
//! - The [`NameService`] capability trait the orchestrator resolves through
//! - A `hickory-resolver` implementation of that trait
//! - The authoritative-nameserver suffix walk
//! - Address family filtering (IPv4 only)
//!
//! The orchestrator depends only on the trait, so tests can script name
//! resolution the same way they script the vantage provider.

mod filter;
mod hickory;
mod records;
mod resolution;

use async_trait::async_trait;
use std::net::IpAddr;

use crate::error_handling::ResolutionError;
use crate::models::{Nameserver, TargetEndpoint};

// Re-export public API
pub use filter::retain_ipv4;
pub use hickory::HickoryNameService;
pub use records::{first_nonempty_suffix, suffix_candidates};

#[cfg(test)]
mod tests;

/// Name resolution operations the orchestrator needs.
///
/// `host_addrs_via` is the location-sensitive lookup: it must answer from the
/// given nameserver address, which the caller has bound as the active
/// resolver for the duration of the call.
#[async_trait]
pub trait NameService: Send + Sync {
    /// Resolves the canonical alias (CNAME target) of `host`. Returns `host`
    /// itself when the name has no alias.
    async fn canonical_alias(&self, host: &str) -> Result<String, ResolutionError>;

    /// Discovers the authoritative nameservers for `host` by walking its
    /// label suffixes from most to least specific and returning the first
    /// suffix with a non-empty NS record set. Lookup failures at one suffix
    /// are skipped; a host with no discoverable nameservers yields an empty
    /// list.
    async fn authoritative_nameservers(&self, host: &str) -> Result<Vec<String>, ResolutionError>;

    /// Resolves `host` to its IPv4 addresses through the default resolver.
    async fn host_addrs(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError>;

    /// Resolves `host` to its IPv4 addresses by querying `nameserver`
    /// directly.
    async fn host_addrs_via(
        &self,
        nameserver: IpAddr,
        host: &str,
    ) -> Result<Vec<IpAddr>, ResolutionError>;
}

/// Populates the target's canonical host and nameserver list.
///
/// Called once during run initialization. An alias failure here is fatal to
/// the run; a host with no discoverable nameservers is left with an empty
/// list and yields zero probes.
pub async fn init_name_resolution(
    target: &mut TargetEndpoint,
    names: &dyn NameService,
) -> Result<(), ResolutionError> {
    target.canonical_host = names.canonical_alias(&target.host).await?;
    if target.canonical_host != target.host {
        log::debug!(
            "{} is an alias for {}",
            target.host,
            target.canonical_host
        );
    }

    let ns_hosts = names.authoritative_nameservers(&target.canonical_host).await?;
    log::info!(
        "Discovered {} nameserver(s) for {}",
        ns_hosts.len(),
        target.canonical_host
    );
    target.nameservers = ns_hosts.into_iter().map(Nameserver::new).collect();
    Ok(())
}
