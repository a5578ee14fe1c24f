//! Authoritative nameserver discovery.
//!
//! The NS record set for a host usually lives at a parent zone, so discovery
//! walks the host's label suffixes from most to least specific and stops at
//! the first suffix that yields records.

use std::future::Future;

use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ResolutionError;

/// Returns the label suffixes of `host`, most specific first, excluding the
/// bare top-level label.
///
/// For `a.b.example.com` this is `["a.b.example.com", "b.example.com",
/// "example.com"]`.
pub fn suffix_candidates(host: &str) -> Vec<String> {
    let parts: Vec<&str> = host.trim_end_matches('.').split('.').collect();
    if parts.len() < 2 {
        return vec![host.to_string()];
    }
    (0..parts.len() - 1)
        .map(|i| parts[i..].join("."))
        .collect()
}

/// Walks `candidates` in order and returns the first non-empty lookup result.
///
/// A lookup error at one candidate is skipped and the walk continues; the
/// walk never aggregates results across suffixes. Returns an empty list when
/// every candidate is empty or failed.
pub async fn first_nonempty_suffix<F, Fut>(candidates: &[String], mut lookup: F) -> Vec<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<String>, ResolutionError>>,
{
    for candidate in candidates {
        match lookup(candidate.clone()).await {
            Ok(records) if !records.is_empty() => return records,
            Ok(_) => {}
            Err(e) => {
                log::debug!("skipping suffix {candidate}: {e}");
            }
        }
    }
    Vec::new()
}

/// Queries NS records for `domain`.
///
/// An empty answer (NXDomain or no records) is an empty vector, not an
/// error; real failures (timeouts, network errors) are propagated so the
/// suffix walk can decide to skip them.
pub async fn lookup_ns_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, ResolutionError> {
    match resolver.lookup(domain, RecordType::NS).await {
        Ok(lookup) => {
            let nameservers: Vec<String> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::NS(ns) = rdata {
                        Some(ns.to_utf8().trim_end_matches('.').to_string())
                    } else {
                        None
                    }
                })
                .collect();
            Ok(nameservers)
        }
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("no records found") || error_msg.contains("NXDomain") {
                Ok(Vec::new())
            } else {
                Err(ResolutionError::NameserverLookup {
                    domain: domain.to_string(),
                    reason: error_msg,
                })
            }
        }
    }
}
