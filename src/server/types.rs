//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::models::ProbeRecord;

/// A probe request.
#[derive(Debug, Deserialize)]
pub struct ProbeRequest {
    /// Endpoint URL to probe.
    pub endpoint: String,
    /// Optional override of the maximum location count.
    #[serde(default)]
    pub locations: Option<usize>,
}

/// One deduplicated probe record, as returned to API clients.
#[derive(Debug, Serialize)]
pub struct ProbeResponseEntry {
    /// Destination address the fetch was pinned to.
    pub destination: String,
    /// Whether the fetch returned HTTP 200.
    pub reachable: bool,
    /// Evidence artifact filename, when capture ran.
    pub evidence_file: Option<String>,
    /// Content fingerprint as lowercase hex; empty when unreachable.
    pub fingerprint: String,
}

impl ProbeResponseEntry {
    /// Maps a probe record to its API representation.
    pub fn from_record(record: &ProbeRecord) -> Self {
        ProbeResponseEntry {
            destination: record.destination.to_string(),
            reachable: record.reachable,
            evidence_file: record.evidence_file.clone(),
            fingerprint: record.fingerprint_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nameserver;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_from_record() {
        let mut record = ProbeRecord::new(
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            vec!["198.51.100.7".to_string()],
            "se",
            Nameserver::new("ns1.example.com"),
        );
        record.reachable = true;
        record.fingerprint = vec![0xab, 0xcd];
        record.evidence_file = Some("example.com_se_abcd.png".to_string());

        let entry = ProbeResponseEntry::from_record(&record);
        assert_eq!(entry.destination, "192.0.2.1");
        assert!(entry.reachable);
        assert_eq!(entry.fingerprint, "abcd");
        assert_eq!(
            entry.evidence_file.as_deref(),
            Some("example.com_se_abcd.png")
        );
    }

    #[test]
    fn test_request_locations_default() {
        let request: ProbeRequest =
            serde_json::from_str(r#"{"endpoint":"https://example.com"}"#).unwrap();
        assert_eq!(request.endpoint, "https://example.com");
        assert!(request.locations.is_none());
    }
}
