//! Evidence capture through an external headless browser.
//!
//! For each reachable record, the endpoint is rendered by an external
//! browser binary and the screenshot is stored under the configured output
//! directory, keyed by host, location and fingerprint. Capture failures are
//! per-record: logged, counted, and skipped.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use tokio::process::Command;

use crate::config::{Config, EVIDENCE_TIMEOUT};
use crate::error_handling::{ErrorType, EvidenceCaptureError, ProbeStats};
use crate::models::{ProbeRecord, TargetEndpoint};

/// Builds the artifact filename for a record.
///
/// Deterministic in (host, location, fingerprint): capturing the same
/// observation twice produces the same name. Unreachable records have no
/// fingerprint and use the `unreachable` marker instead.
pub fn evidence_filename(host: &str, location: &str, fingerprint_hex: &str) -> String {
    let digest = if fingerprint_hex.is_empty() {
        "unreachable"
    } else {
        &fingerprint_hex[..fingerprint_hex.len().min(16)]
    };
    format!("{host}_{location}_{digest}.png")
}

/// Captures a screenshot for one record and writes the artifact filename
/// back into it.
///
/// The browser renders the original endpoint URL through the currently
/// active routing, so the capture reflects the same vantage the record was
/// probed from.
pub async fn capture(
    config: &Config,
    target: &TargetEndpoint,
    record: &mut ProbeRecord,
) -> Result<(), EvidenceCaptureError> {
    tokio::fs::create_dir_all(&config.evidence_dir).await?;

    let filename = evidence_filename(
        &target.canonical_host,
        &record.location,
        &record.fingerprint_hex(),
    );
    let path: PathBuf = config.evidence_dir.join(&filename);

    run_browser(&config.browser_path, &path, &target.endpoint).await?;

    debug!("captured evidence {}", path.display());
    record.evidence_file = Some(filename);
    Ok(())
}

async fn run_browser(
    browser: &Path,
    output: &Path,
    endpoint: &str,
) -> Result<(), EvidenceCaptureError> {
    let screenshot_arg = format!("--screenshot={}", output.display());
    let child = Command::new(browser)
        .args([
            "--headless",
            "--disable-gpu",
            "--window-size=1280,1024",
            screenshot_arg.as_str(),
            endpoint,
        ])
        .output();

    let output = tokio::time::timeout(EVIDENCE_TIMEOUT, child)
        .await
        .map_err(|_| EvidenceCaptureError::Timeout)??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(EvidenceCaptureError::Browser {
            status: output.status.to_string(),
            stderr: stderr.chars().take(200).collect(),
        });
    }
    Ok(())
}

/// Captures evidence for every reachable record in `records`.
///
/// Unreachable records are skipped; there is nothing to render. Failures are
/// logged and counted, never propagated.
pub async fn capture_all(
    config: &Config,
    target: &TargetEndpoint,
    records: &mut [ProbeRecord],
    stats: &ProbeStats,
) {
    for record in records.iter_mut() {
        if !record.reachable {
            debug!("skipping evidence for unreachable {}", record.destination);
            continue;
        }
        if let Err(e) = capture(config, target, record).await {
            warn!(
                "evidence capture failed for {} ({}): {e}",
                record.destination, record.location
            );
            stats.increment(ErrorType::EvidenceCapture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nameserver;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_evidence_filename_is_deterministic() {
        let a = evidence_filename("example.com", "se", "aabbccddeeff00112233");
        let b = evidence_filename("example.com", "se", "aabbccddeeff00112233");
        assert_eq!(a, b);
        assert_eq!(a, "example.com_se_aabbccddeeff0011.png");
    }

    #[test]
    fn test_evidence_filename_varies_by_key() {
        let base = evidence_filename("example.com", "se", "aabb");
        assert_ne!(base, evidence_filename("example.com", "de", "aabb"));
        assert_ne!(base, evidence_filename("example.org", "se", "aabb"));
        assert_ne!(base, evidence_filename("example.com", "se", "ccdd"));
    }

    #[test]
    fn test_evidence_filename_empty_fingerprint() {
        assert_eq!(
            evidence_filename("example.com", "se", ""),
            "example.com_se_unreachable.png"
        );
    }

    #[tokio::test]
    async fn test_capture_missing_browser_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            evidence_dir: dir.path().to_path_buf(),
            browser_path: PathBuf::from("/nonexistent/browser-binary"),
            ..Default::default()
        };
        let target = TargetEndpoint::parse("https://example.com").expect("target");
        let mut record = ProbeRecord::new(
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            vec![],
            "se",
            Nameserver::new("ns1.example.com"),
        );
        record.reachable = true;
        record.fingerprint = vec![0xaa; 32];

        let result = capture(&config, &target, &mut record).await;
        assert!(matches!(result, Err(EvidenceCaptureError::Io(_))));
        assert!(record.evidence_file.is_none());
    }

    #[tokio::test]
    async fn test_capture_all_skips_unreachable_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            evidence_dir: dir.path().to_path_buf(),
            browser_path: PathBuf::from("/nonexistent/browser-binary"),
            ..Default::default()
        };
        let target = TargetEndpoint::parse("https://example.com").expect("target");
        let stats = ProbeStats::new();
        let mut records = vec![ProbeRecord::new(
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            vec![],
            "se",
            Nameserver::new("ns1.example.com"),
        )];

        capture_all(&config, &target, &mut records, &stats).await;
        assert!(records[0].evidence_file.is_none());
        assert_eq!(stats.count(ErrorType::EvidenceCapture), 0);
    }
}
