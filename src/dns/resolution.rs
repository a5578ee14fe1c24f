//! Alias and address lookups through `hickory-resolver`.

use std::net::IpAddr;

use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::filter::retain_ipv4;
use crate::error_handling::ResolutionError;

/// Resolves the canonical alias of `host`.
///
/// Queries the CNAME record; when the name has no alias (no records,
/// NXDomain) the host itself is the canonical name. Real lookup failures are
/// propagated.
pub async fn resolve_canonical_alias(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<String, ResolutionError> {
    match resolver.lookup(host, RecordType::CNAME).await {
        Ok(lookup) => {
            let alias = lookup.iter().find_map(|rdata| {
                if let RData::CNAME(cname) = rdata {
                    Some(cname.to_utf8().trim_end_matches('.').to_string())
                } else {
                    None
                }
            });
            Ok(alias.unwrap_or_else(|| host.to_string()))
        }
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("no records found") || error_msg.contains("NXDomain") {
                Ok(host.to_string())
            } else {
                Err(ResolutionError::AliasLookup {
                    host: host.to_string(),
                    reason: error_msg,
                })
            }
        }
    }
}

/// Resolves `host` to its addresses, filtered to IPv4.
///
/// An answer that becomes empty after filtering is valid and yields zero
/// probes for the caller.
pub async fn resolve_ipv4_addrs(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<IpAddr>, ResolutionError> {
    let lookup = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| ResolutionError::AddressLookup {
            host: host.to_string(),
            reason: e.to_string(),
        })?;
    let mut addrs: Vec<IpAddr> = lookup.iter().collect();
    retain_ipv4(&mut addrs);
    Ok(addrs)
}
