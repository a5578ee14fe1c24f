//! Divergence comparison and result presentation.
//!
//! The first record's fingerprint is the baseline; every other record whose
//! fingerprint differs is divergent. This is a byte-exact comparison, not
//! clustering. For presentation, records are sorted by ascending fingerprint
//! frequency so rare answers surface first.

use std::collections::HashMap;

use colored::*;
use log::info;

use crate::models::ProbeRecord;

/// Compares every record's fingerprint against the baseline (the first
/// record) and returns how many diverge.
///
/// Logs each record's destination and fingerprint, highlighting mismatches.
/// A set with zero or one records is degenerate and compares nothing.
pub fn baseline_divergent(records: &[ProbeRecord]) -> usize {
    let Some(baseline) = records.first() else {
        return 0;
    };
    if records.len() == 1 {
        return 0;
    }

    let mut divergent = 0;
    for record in records {
        info!(
            "  {}: {}",
            record.destination,
            record.fingerprint_hex()
        );
        if record.fingerprint != baseline.fingerprint {
            divergent += 1;
            println!(
                "{}",
                format!(
                    "{} has a different fingerprint: {}",
                    record.destination,
                    record.fingerprint_hex()
                )
                .red()
            );
        }
    }
    divergent
}

fn fingerprint_frequencies(records: &[ProbeRecord]) -> HashMap<Vec<u8>, usize> {
    let mut frequencies: HashMap<Vec<u8>, usize> = HashMap::new();
    for record in records {
        *frequencies.entry(record.fingerprint.clone()).or_insert(0) += 1;
    }
    frequencies
}

/// Sorts records by ascending frequency of their fingerprint, so the rare
/// (potentially divergent) answers come first.
///
/// The sort is stable: records sharing a fingerprint keep their encounter
/// order.
pub fn sort_by_fingerprint_frequency(records: &mut [ProbeRecord]) {
    let frequencies = fingerprint_frequencies(records);
    records.sort_by_key(|record| frequencies[&record.fingerprint]);
}

/// Prints the per-record report.
pub fn render_report(records: &[ProbeRecord]) {
    for record in records {
        let status = if record.reachable {
            "[+] Status: online".green()
        } else {
            "[-] Status: offline".red()
        };
        println!("{status}");
        println!("IP Source: {:?}", record.sources);
        println!("IP Dest: {}", record.destination);
        println!("Fingerprint: {}", record.fingerprint_hex());
        println!("Country Code IP Source: {}", record.location);
        if let Some(file) = &record.evidence_file {
            println!("Evidence file: {file}");
        }
        println!(
            "Nameserver requested: {} {:?}\n",
            record.nameserver.host, record.nameserver.addrs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nameserver;

    fn record(destination: &str, fingerprint: &[u8]) -> ProbeRecord {
        let mut r = ProbeRecord::new(
            destination.parse().unwrap(),
            vec![],
            "se",
            Nameserver::new("ns1.example.com"),
        );
        r.fingerprint = fingerprint.to_vec();
        r.reachable = !fingerprint.is_empty();
        r
    }

    #[test]
    fn test_baseline_divergent_empty_set() {
        assert_eq!(baseline_divergent(&[]), 0);
    }

    #[test]
    fn test_baseline_divergent_single_record() {
        assert_eq!(baseline_divergent(&[record("192.0.2.1", b"aa")]), 0);
    }

    #[test]
    fn test_baseline_divergent_counts_mismatches() {
        let records = vec![
            record("192.0.2.1", b"aa"),
            record("192.0.2.2", b"aa"),
            record("192.0.2.3", b"bb"),
        ];
        assert_eq!(baseline_divergent(&records), 1);
    }

    #[test]
    fn test_baseline_divergent_all_unreachable() {
        // All fetches failed: every fingerprint is empty, so nothing is
        // flagged against the (empty) baseline.
        let records = vec![
            record("192.0.2.1", b""),
            record("192.0.2.2", b""),
            record("192.0.2.3", b""),
        ];
        assert_eq!(baseline_divergent(&records), 0);
    }

    #[test]
    fn test_sort_by_fingerprint_frequency_rare_first() {
        let mut records = vec![
            record("192.0.2.1", b"common"),
            record("192.0.2.2", b"common"),
            record("192.0.2.3", b"rare"),
            record("192.0.2.4", b"common"),
        ];
        sort_by_fingerprint_frequency(&mut records);
        assert_eq!(records[0].destination.to_string(), "192.0.2.3");
    }

    #[test]
    fn test_sort_by_fingerprint_frequency_is_stable() {
        let mut records = vec![
            record("192.0.2.1", b"aa"),
            record("192.0.2.2", b"aa"),
            record("192.0.2.3", b"aa"),
        ];
        sort_by_fingerprint_frequency(&mut records);
        let destinations: Vec<String> =
            records.iter().map(|r| r.destination.to_string()).collect();
        assert_eq!(destinations, vec!["192.0.2.1", "192.0.2.2", "192.0.2.3"]);
    }
}
