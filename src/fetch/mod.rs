//! Pinned content fetching and fingerprinting.
//!
//! A probe fetch must hit one specific destination address regardless of what
//! any resolver would answer at request time, so the HTTP client is built
//! with the target host pinned to that address. The response body is reduced
//! to a SHA3-256 digest; bodies are never kept.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};
use sha3::{Digest, Sha3_256};

use crate::config::DIAL_TIMEOUT_SECS;
use crate::error_handling::{ErrorType, FetchError, ProbeStats};
use crate::models::{ProbeRecord, TargetEndpoint};

/// Computes the SHA3-256 fingerprint of a response body.
pub fn fingerprint_body(body: &[u8]) -> Vec<u8> {
    let mut hasher = Sha3_256::new();
    hasher.update(body);
    hasher.finalize().to_vec()
}

/// Fetches the target endpoint with the connection pinned to `destination`
/// and returns the body fingerprint.
///
/// Issues a single GET to the original endpoint URL. Any dial for
/// `host:port` is redirected to `destination:port`; DNS plays no part in
/// where the connection goes.
///
/// # Errors
///
/// Returns [`FetchError::Status`] for any non-200 response and
/// [`FetchError::Request`] for transport failures.
pub async fn fetch_fingerprint(
    target: &TargetEndpoint,
    destination: IpAddr,
    timeout_seconds: u64,
) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::Client::builder()
        .resolve(&target.host, SocketAddr::new(destination, target.port))
        .connect_timeout(Duration::from_secs(DIAL_TIMEOUT_SECS))
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;

    debug!("fetching {} pinned to {destination}", target.endpoint);
    let response = client.get(&target.endpoint).send().await?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    Ok(fingerprint_body(&body))
}

/// Runs the fetch for every record in `records`, writing fingerprint and
/// reachability back into each.
///
/// Fetches only depend on the pinned destination address, not on the shared
/// resolver binding, so the records of one binding are fetched concurrently.
/// A failed fetch marks its record unreachable and the run continues.
pub async fn fetch_all(
    target: &TargetEndpoint,
    records: &mut [ProbeRecord],
    timeout_seconds: u64,
    stats: &ProbeStats,
) {
    let mut tasks: FuturesUnordered<_> = records
        .iter_mut()
        .map(|record| async move {
            let destination = record.destination;
            match fetch_fingerprint(target, destination, timeout_seconds).await {
                Ok(fingerprint) => {
                    record.fingerprint = fingerprint;
                    record.reachable = true;
                }
                Err(e) => {
                    warn!("fetch failed for {destination}: {e}");
                    match e {
                        FetchError::Status(_) => stats.increment(ErrorType::FetchStatus),
                        FetchError::Request(_) => stats.increment(ErrorType::FetchTransport),
                    }
                }
            }
        })
        .collect();

    while tasks.next().await.is_some() {}
}
