//! Core data model for a probing run.
//!
//! A run revolves around three types:
//! - [`TargetEndpoint`]: the endpoint under test, enriched with its canonical
//!   host and authoritative nameservers during initialization
//! - [`Nameserver`]: a nameserver hostname plus its (lazily resolved) addresses
//! - [`ProbeRecord`]: one observation of the target from one vantage point,
//!   pinned to one destination address

use std::net::IpAddr;

use url::Url;

use crate::error_handling::ResolutionError;

/// The endpoint under test.
///
/// Created once per run from user input. The canonical host and nameserver
/// list are populated by name resolution during initialization; the remaining
/// fields are immutable after parsing.
#[derive(Debug, Clone)]
pub struct TargetEndpoint {
    /// Raw endpoint URL as given by the user.
    pub endpoint: String,
    /// URL scheme (`http` or `https`).
    pub scheme: String,
    /// Port the fetch connects to (explicit port, or 80/443 from the scheme).
    pub port: u16,
    /// Hostname extracted from the URL.
    pub host: String,
    /// Canonical host after CNAME resolution. Equal to `host` when the name
    /// has no alias.
    pub canonical_host: String,
    /// Authoritative nameservers discovered for the host.
    pub nameservers: Vec<Nameserver>,
}

impl TargetEndpoint {
    /// Parses a raw endpoint URL into a `TargetEndpoint`.
    ///
    /// Only `http` and `https` schemes are accepted. The port is taken from
    /// the URL if explicit, otherwise derived from the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidEndpoint`] for non-http(s) URLs and
    /// [`ResolutionError::MissingHost`] for URLs without a host component.
    pub fn parse(endpoint: &str) -> Result<Self, ResolutionError> {
        let url = Url::parse(endpoint)
            .map_err(|e| ResolutionError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        let scheme = url.scheme().to_string();
        if scheme != "http" && scheme != "https" {
            return Err(ResolutionError::InvalidEndpoint(format!(
                "{endpoint}: endpoint must use http:// or https://"
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ResolutionError::MissingHost(endpoint.to_string()))?
            .to_string();

        let port = url
            .port_or_known_default()
            .ok_or_else(|| ResolutionError::InvalidEndpoint(endpoint.to_string()))?;

        Ok(TargetEndpoint {
            endpoint: endpoint.to_string(),
            scheme,
            port,
            canonical_host: host.clone(),
            host,
            nameservers: Vec::new(),
        })
    }
}

/// A nameserver and the addresses it resolved to.
///
/// The address set starts empty and is populated fresh on each probe
/// iteration, since it may depend on the current vantage point. A nameserver
/// whose addresses cannot be discovered is retained with an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nameserver {
    /// Nameserver hostname.
    pub host: String,
    /// Resolved addresses, filtered to IPv4.
    pub addrs: Vec<IpAddr>,
}

impl Nameserver {
    /// Creates a nameserver entry with an empty address set.
    pub fn new(host: impl Into<String>) -> Self {
        Nameserver {
            host: host.into(),
            addrs: Vec::new(),
        }
    }
}

/// One observation of the target from one vantage point.
///
/// The fingerprint is empty and `reachable` is false until the content
/// fetcher has run against the record; the evidence filename is set by the
/// capture step, when enabled.
#[derive(Debug, Clone)]
pub struct ProbeRecord {
    /// Destination address the fetch is pinned to.
    pub destination: IpAddr,
    /// Source addresses reported by the vantage provider for this location.
    pub sources: Vec<String>,
    /// Location code of the vantage point (e.g. `se`).
    pub location: String,
    /// SHA3-256 digest of the response body; empty until fetched.
    pub fingerprint: Vec<u8>,
    /// Whether the fetch returned HTTP 200.
    pub reachable: bool,
    /// Snapshot of the nameserver (host plus the single bound address) that
    /// produced this destination.
    pub nameserver: Nameserver,
    /// Evidence artifact filename, when capture ran for this record.
    pub evidence_file: Option<String>,
}

impl ProbeRecord {
    /// Creates a record for a destination discovered through `nameserver`
    /// while probing from `location`.
    pub fn new(
        destination: IpAddr,
        sources: Vec<String>,
        location: impl Into<String>,
        nameserver: Nameserver,
    ) -> Self {
        ProbeRecord {
            destination,
            sources,
            location: location.into(),
            fingerprint: Vec::new(),
            reachable: false,
            nameserver,
            evidence_file: None,
        }
    }

    /// Composite dedup key: destination, source set, location and fingerprint.
    ///
    /// Two records with equal keys are duplicates; the aggregator keeps the
    /// first one seen.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.destination,
            self.sources.join(","),
            self.location,
            self.fingerprint_hex()
        )
    }

    /// Fingerprint rendered as lowercase hex. Empty string when unfetched or
    /// unreachable.
    pub fn fingerprint_hex(&self) -> String {
        self.fingerprint.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_endpoint() {
        let target = TargetEndpoint::parse("https://example.com/path").unwrap();
        assert_eq!(target.scheme, "https");
        assert_eq!(target.port, 443);
        assert_eq!(target.host, "example.com");
        assert_eq!(target.canonical_host, "example.com");
        assert!(target.nameservers.is_empty());
    }

    #[test]
    fn test_parse_http_endpoint() {
        let target = TargetEndpoint::parse("http://example.com").unwrap();
        assert_eq!(target.scheme, "http");
        assert_eq!(target.port, 80);
    }

    #[test]
    fn test_parse_subdomain_host() {
        let target = TargetEndpoint::parse("https://sub.example.com/path").unwrap();
        assert_eq!(target.host, "sub.example.com");
    }

    #[test]
    fn test_parse_explicit_port() {
        let target = TargetEndpoint::parse("http://example.com:8080").unwrap();
        assert_eq!(target.port, 8080);
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        let result = TargetEndpoint::parse("ftp://example.com");
        assert!(matches!(result, Err(ResolutionError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_url() {
        assert!(TargetEndpoint::parse("://invalid-url").is_err());
        assert!(TargetEndpoint::parse("").is_err());
    }

    #[test]
    fn test_identity_key_distinguishes_location() {
        let ns = Nameserver::new("ns1.example.com");
        let a = ProbeRecord::new("192.0.2.1".parse().unwrap(), vec![], "se", ns.clone());
        let b = ProbeRecord::new("192.0.2.1".parse().unwrap(), vec![], "de", ns);
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_identity_key_equal_for_duplicates() {
        let ns = Nameserver::new("ns1.example.com");
        let mut a = ProbeRecord::new(
            "192.0.2.1".parse().unwrap(),
            vec!["198.51.100.7".into()],
            "se",
            ns.clone(),
        );
        let mut b = a.clone();
        a.fingerprint = vec![0xab; 32];
        b.fingerprint = vec![0xab; 32];
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_new_record_is_unfetched() {
        let record = ProbeRecord::new(
            "192.0.2.1".parse().unwrap(),
            vec![],
            "se",
            Nameserver::new("ns1.example.com"),
        );
        assert!(!record.reachable);
        assert!(record.fingerprint.is_empty());
        assert_eq!(record.fingerprint_hex(), "");
        assert!(record.evidence_file.is_none());
    }
}
