//! `hickory-resolver` implementation of [`NameService`].

use async_trait::async_trait;
use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;

use super::records::{first_nonempty_suffix, lookup_ns_records, suffix_candidates};
use super::resolution::{resolve_canonical_alias, resolve_ipv4_addrs};
use super::NameService;
use crate::error_handling::ResolutionError;
use crate::initialization::resolver_for_nameserver;

/// Production name service backed by `hickory-resolver`.
///
/// Default lookups go through the system-configured upstreams; the
/// location-sensitive destination lookup constructs a resolver pointed
/// directly at the bound nameserver address, so the answer comes from that
/// nameserver and nothing else.
pub struct HickoryNameService {
    resolver: TokioAsyncResolver,
}

impl HickoryNameService {
    /// Wraps an initialized resolver.
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        HickoryNameService { resolver }
    }
}

#[async_trait]
impl NameService for HickoryNameService {
    async fn canonical_alias(&self, host: &str) -> Result<String, ResolutionError> {
        resolve_canonical_alias(host, &self.resolver).await
    }

    async fn authoritative_nameservers(&self, host: &str) -> Result<Vec<String>, ResolutionError> {
        let candidates = suffix_candidates(host);
        let resolver = &self.resolver;
        let nameservers =
            first_nonempty_suffix(&candidates, |domain| async move {
                lookup_ns_records(&domain, resolver).await
            })
            .await;
        Ok(nameservers)
    }

    async fn host_addrs(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        resolve_ipv4_addrs(host, &self.resolver).await
    }

    async fn host_addrs_via(
        &self,
        nameserver: IpAddr,
        host: &str,
    ) -> Result<Vec<IpAddr>, ResolutionError> {
        let bound = resolver_for_nameserver(nameserver);
        resolve_ipv4_addrs(host, &bound).await
    }
}
