//! Error type definitions.
//!
//! One enum per failure domain, mirroring how each failure propagates through
//! the pipeline.

use std::net::IpAddr;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Name resolution failure: endpoint parsing, alias resolution, nameserver
/// discovery, or address lookup.
///
/// These skip the affected step; only an alias failure during run
/// initialization aborts the run, because without a canonical host there is
/// nothing to probe.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The endpoint URL is not a usable http(s) URL.
    #[error("invalid endpoint {0}")]
    InvalidEndpoint(String),

    /// The endpoint URL has no host component.
    #[error("endpoint {0} has no host")]
    MissingHost(String),

    /// Canonical alias (CNAME) resolution failed.
    #[error("alias resolution failed for {host}: {reason}")]
    AliasLookup {
        /// Host whose alias was queried.
        host: String,
        /// Resolver error text.
        reason: String,
    },

    /// A nameserver (NS) record query failed.
    #[error("nameserver lookup failed for {domain}: {reason}")]
    NameserverLookup {
        /// Domain suffix that was queried.
        domain: String,
        /// Resolver error text.
        reason: String,
    },

    /// An address (A) lookup failed.
    #[error("address lookup failed for {host}: {reason}")]
    AddressLookup {
        /// Host whose addresses were queried.
        host: String,
        /// Resolver error text.
        reason: String,
    },
}

/// Vantage switch failure. Run-fatal: probes taken after an unconfirmed
/// switch would be attributed to the wrong location.
#[derive(Error, Debug)]
pub enum VantageSwitchError {
    /// The provider could not establish its tunnel.
    #[error("vantage connect failed: {0}")]
    Connect(String),

    /// A provider command failed to execute.
    #[error("vantage command failed: {0}")]
    Command(String),

    /// The switch was requested but never confirmed within the deadline.
    #[error("timed out waiting for vantage to reach location {location}")]
    ConfirmTimeout {
        /// Location code the switch was waiting for.
        location: String,
    },
}

/// Resolver binding failure. Aborts the current location iteration only; the
/// orchestrator still attempts to restore the default resolver on the way
/// out.
#[derive(Error, Debug)]
pub enum ResolverBindError {
    /// Binding a custom resolver failed.
    #[error("failed to bind resolver {addr}: {reason}")]
    Bind {
        /// Nameserver address the bind targeted.
        addr: IpAddr,
        /// Provider error text.
        reason: String,
    },

    /// Restoring the default resolver failed.
    #[error("failed to restore default resolver: {0}")]
    Reset(String),
}

/// Content fetch failure. Per-record: the record is marked unreachable and
/// the run continues.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (dial, TLS, timeout, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-200 status.
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Evidence capture failure. Per-record: logged and skipped.
#[derive(Error, Debug)]
pub enum EvidenceCaptureError {
    /// Filesystem error creating the artifact directory or file.
    #[error("evidence I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external browser exited unsuccessfully.
    #[error("browser exited with {status}: {stderr}")]
    Browser {
        /// Exit status description.
        status: String,
        /// Captured stderr, truncated.
        stderr: String,
    },

    /// The external browser did not finish within the capture deadline.
    #[error("browser timed out")]
    Timeout,
}

/// Counter categories for per-run statistics.
///
/// These are the degradable failures: each increments a counter and the run
/// carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Nameserver address re-resolution failed for one nameserver.
    NameserverAddressLookup,
    /// Canonical destination lookup through a bound resolver failed.
    DestinationLookup,
    /// Binding a custom resolver failed.
    ResolverBind,
    /// Restoring the default resolver failed.
    ResolverReset,
    /// Fetch failed at the transport level.
    FetchTransport,
    /// Fetch completed with a non-200 status.
    FetchStatus,
    /// Evidence capture failed for a record.
    EvidenceCapture,
}

impl ErrorType {
    /// Human-readable label used in the end-of-run summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::NameserverAddressLookup => "nameserver address lookup failures",
            ErrorType::DestinationLookup => "destination lookup failures",
            ErrorType::ResolverBind => "resolver bind failures",
            ErrorType::ResolverReset => "resolver reset failures",
            ErrorType::FetchTransport => "fetch transport failures",
            ErrorType::FetchStatus => "non-200 fetch responses",
            ErrorType::EvidenceCapture => "evidence capture failures",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
