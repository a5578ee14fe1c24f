//! DNS resolver initialization.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_PORT, DNS_TIMEOUT_SECS};

fn default_opts() -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2; // fail fast on unresponsive servers
    opts.ndots = 0; // never append search domains to probe targets
    opts
}

/// Initializes the default DNS resolver used for alias resolution, the
/// nameserver suffix walk, and nameserver address lookups.
///
/// Uses the default upstream configuration with short timeouts so slow
/// resolvers fail fast rather than stalling the sequential pipeline.
pub fn init_resolver() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio(ResolverConfig::default(), default_opts())
}

/// Builds a resolver that queries only the given nameserver address.
///
/// Canonical destination lookups run through this resolver while the same
/// address is bound at the vantage provider, so the answer reflects what that
/// nameserver serves to the current vantage point.
pub fn resolver_for_nameserver(addr: IpAddr) -> TokioAsyncResolver {
    let group = NameServerConfigGroup::from_ips_clear(&[addr], DNS_PORT, true);
    let config = ResolverConfig::from_parts(None, Vec::new(), group);
    TokioAsyncResolver::tokio(config, default_opts())
}
