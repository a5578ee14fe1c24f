//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_BROWSER, DEFAULT_EVIDENCE_DIR, DEFAULT_LOCATION_COUNT, HTTP_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and run configuration.
///
/// This struct is generated by `clap` from the field attributes and doubles
/// as the library configuration; it can be constructed programmatically with
/// `..Default::default()`.
///
/// # Examples
///
/// ```bash
/// # One-shot probe across three locations
/// geo_probe https://example.com
///
/// # Probe five locations and capture screenshots
/// geo_probe https://example.com --locations 5 --capture-evidence
///
/// # Run as an HTTP API trigger instead
/// geo_probe --api-port 5001
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geo_probe",
    about = "Probes a web endpoint from multiple VPN vantage points and flags content divergence."
)]
pub struct Config {
    /// Endpoint URL to probe (http:// or https://). Required unless running
    /// with --api-port, where each request carries its own endpoint.
    #[arg(value_parser)]
    pub endpoint: Option<String>,

    /// Maximum number of vantage locations to probe
    #[arg(long, default_value_t = DEFAULT_LOCATION_COUNT)]
    pub locations: usize,

    /// Capture a screenshot per deduplicated record
    #[arg(long, default_value_t = false)]
    pub capture_evidence: bool,

    /// Output directory for evidence artifacts
    #[arg(long, value_parser, default_value = DEFAULT_EVIDENCE_DIR)]
    pub evidence_dir: PathBuf,

    /// External browser binary used for evidence capture
    #[arg(long, value_parser, default_value = DEFAULT_BROWSER)]
    pub browser_path: PathBuf,

    /// Per-fetch timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Run an HTTP API server on this port instead of a one-shot probe
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: None,
            locations: DEFAULT_LOCATION_COUNT,
            capture_evidence: false,
            evidence_dir: PathBuf::from(DEFAULT_EVIDENCE_DIR),
            browser_path: PathBuf::from(DEFAULT_BROWSER),
            timeout_seconds: HTTP_TIMEOUT_SECS,
            api_port: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.locations, DEFAULT_LOCATION_COUNT);
        assert!(!config.capture_evidence);
        assert!(config.api_port.is_none());
    }

    #[test]
    fn test_cli_parsing() {
        let config = Config::parse_from([
            "geo_probe",
            "https://example.com",
            "--locations",
            "5",
            "--capture-evidence",
        ]);
        assert_eq!(config.endpoint.as_deref(), Some("https://example.com"));
        assert_eq!(config.locations, 5);
        assert!(config.capture_evidence);
    }
}
