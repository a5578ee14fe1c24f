//! Configuration constants.
//!
//! Defaults and fixed operational parameters for the probing pipeline.

use std::time::Duration;

/// Default number of vantage locations visited per run.
pub const DEFAULT_LOCATION_COUNT: usize = 3;

/// Interval between vantage status polls while waiting for a location switch.
pub const VANTAGE_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Overall deadline for a location switch to be confirmed. Hitting this is a
/// run-fatal condition: probes after an unconfirmed switch would be
/// attributed to the wrong location.
pub const VANTAGE_CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);
/// Settle delay after a confirmed switch, giving the tunnel time to carry
/// traffic through the new relay.
pub const VANTAGE_SETTLE_DELAY: Duration = Duration::from_secs(3);

// Network operation timeouts
/// TCP dial timeout for the pinned fetch, in seconds.
pub const DIAL_TIMEOUT_SECS: u64 = 5;
/// Default overall per-fetch timeout, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// DNS query timeout in seconds. Most queries complete in well under a
/// second; failing fast matters more than retrying slow resolvers.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Port used when querying a bound nameserver directly.
pub const DNS_PORT: u16 = 53;

/// Size in bytes of a content fingerprint (SHA3-256 digest).
pub const FINGERPRINT_LEN: usize = 32;

// Evidence capture
/// Deadline for one external browser invocation.
pub const EVIDENCE_TIMEOUT: Duration = Duration::from_secs(30);
/// Default output directory for evidence artifacts.
pub const DEFAULT_EVIDENCE_DIR: &str = "./evidence";
/// Default external browser binary used for capture.
pub const DEFAULT_BROWSER: &str = "chromium";
