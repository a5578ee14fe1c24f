//! Probe record aggregation.
//!
//! Records accumulate in encounter order over the whole run and are
//! deduplicated once at the end by identity key. A grouping query scopes a
//! record subset to one location and one destination set; the evidence and
//! fetch steps use slices of newly appended records instead, so the query
//! mainly serves presentation and external consumers.

use std::collections::HashSet;
use std::net::IpAddr;

use crate::models::ProbeRecord;

/// Deduplicates records by identity key, keeping the first record seen for
/// each key.
///
/// Stable and order-preserving: the survivors appear in their original
/// encounter order, so running the filter on its own output is a no-op.
pub fn dedup_records(records: Vec<ProbeRecord>) -> Vec<ProbeRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.identity_key()))
        .collect()
}

/// Selects the records for one location whose destination appears in the
/// given destination set, deduplicating by identity key within the
/// selection.
pub fn select_by_location_and_hosts<'a>(
    records: &'a [ProbeRecord],
    location: &str,
    hosts: &[IpAddr],
) -> Vec<&'a ProbeRecord> {
    let host_set: HashSet<&IpAddr> = hosts.iter().collect();
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| record.location == location && host_set.contains(&record.destination))
        .filter(|record| seen.insert(record.identity_key()))
        .collect()
}
