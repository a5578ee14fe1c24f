//! Address family filtering.

use std::net::IpAddr;

/// Removes every address that is not IPv4.
///
/// The pipeline probes one address family; mixed answers are narrowed before
/// use. Filtering an already-filtered set is a no-op, and a set that becomes
/// empty is valid (it simply yields no probes).
pub fn retain_ipv4(addrs: &mut Vec<IpAddr>) {
    addrs.retain(|addr| addr.is_ipv4());
}
