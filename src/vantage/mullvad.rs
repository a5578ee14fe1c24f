//! Mullvad CLI vantage provider.
//!
//! Drives the `mullvad` command-line client. All parsing of the client's
//! text output lives here; the rest of the pipeline only ever sees structured
//! `(code, addresses)` results.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::net::IpAddr;

use log::debug;
use regex::Regex;
use tokio::process::Command;

use super::VantageProvider;
use crate::config::{VANTAGE_CONFIRM_TIMEOUT, VANTAGE_POLL_INTERVAL, VANTAGE_SETTLE_DELAY};
use crate::error_handling::{ResolverBindError, VantageSwitchError};
use crate::utils::poll_until;

/// Vantage provider backed by the Mullvad CLI.
pub struct MullvadProvider {
    binary: String,
}

impl MullvadProvider {
    /// Creates a provider driving the `mullvad` binary on `PATH`.
    pub fn new() -> Self {
        MullvadProvider {
            binary: "mullvad".to_string(),
        }
    }

    /// Creates a provider driving a specific client binary.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        MullvadProvider {
            binary: binary.into(),
        }
    }

    async fn exec(&self, args: &[&str]) -> Result<String, String> {
        debug!("running {} {}", self.binary, args.join(" "));
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| format!("{} {}: {e}", self.binary, args.join(" ")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} {} exited with {}: {}",
                self.binary,
                args.join(" "),
                output.status,
                stderr.trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for MullvadProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `mullvad relay list` output into `location code -> relay names`.
///
/// The listing indents cities with one tab and relays with two; country
/// lines carry the location code in parentheses.
fn parse_relay_list(output: &str) -> BTreeMap<String, Vec<String>> {
    let mut relays: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current_code: Option<String> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        if line.starts_with("\t\t") {
            if let (Some(code), Some(name)) = (&current_code, trimmed.split_whitespace().next()) {
                relays
                    .entry(code.clone())
                    .or_default()
                    .push(name.to_string());
            }
        } else if line.starts_with('\t') {
            // city line
            continue;
        } else if let Some(idx) = trimmed.find(" (") {
            let rest = &trimmed[idx + 2..];
            if let Some(end) = rest.find(')') {
                current_code = Some(rest[..end].to_string());
            }
        }
    }

    relays
}

fn extract_hostname(status: &str) -> Option<String> {
    let re = Regex::new(r#"hostname:\s*"([^"]+)""#).ok()?;
    re.captures(status)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_ipv4(status: &str) -> Option<String> {
    let re = Regex::new(r"([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)").ok()?;
    re.captures(status)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Checks whether a status dump reports a relay in the expected location and
/// extracts the vantage's source address when it does.
///
/// Relay hostnames embed the location code (`se-sto-wg-001`), so the match is
/// a substring test against the reported hostname.
fn status_matches(status: &str, expected: &str) -> Option<Vec<String>> {
    let hostname = extract_hostname(status)?;
    if !hostname.contains(expected) {
        return None;
    }
    extract_ipv4(status).map(|ip| vec![ip])
}

#[async_trait]
impl VantageProvider for MullvadProvider {
    async fn connect(&self) -> Result<(), VantageSwitchError> {
        self.exec(&["connect"])
            .await
            .map_err(VantageSwitchError::Connect)?;
        tokio::time::sleep(VANTAGE_SETTLE_DELAY).await;
        Ok(())
    }

    async fn list_locations(&self) -> Result<BTreeMap<String, Vec<String>>, VantageSwitchError> {
        let output = self
            .exec(&["relay", "list"])
            .await
            .map_err(VantageSwitchError::Command)?;
        Ok(parse_relay_list(&output))
    }

    async fn set_location(&self, code: &str) -> Result<Vec<String>, VantageSwitchError> {
        self.exec(&["relay", "set", "location", code])
            .await
            .map_err(VantageSwitchError::Command)?;

        let sources = self.check_status(code).await?;

        // Confirmed, but the tunnel needs a moment before carrying traffic.
        tokio::time::sleep(VANTAGE_SETTLE_DELAY).await;
        Ok(sources)
    }

    async fn set_custom_resolver(&self, addr: IpAddr) -> Result<(), ResolverBindError> {
        self.exec(&["dns", "set", "custom", &addr.to_string()])
            .await
            .map(|_| ())
            .map_err(|reason| ResolverBindError::Bind { addr, reason })
    }

    async fn set_default_resolver(&self) -> Result<(), ResolverBindError> {
        self.exec(&["dns", "set", "default"])
            .await
            .map(|_| ())
            .map_err(ResolverBindError::Reset)
    }

    async fn check_status(&self, expected: &str) -> Result<Vec<String>, VantageSwitchError> {
        poll_until(VANTAGE_POLL_INTERVAL, VANTAGE_CONFIRM_TIMEOUT, || async move {
            let status = match self.exec(&["status", "--debug"]).await {
                Ok(output) => output,
                Err(e) => {
                    debug!("status query failed, retrying: {e}");
                    return None;
                }
            };
            let matched = status_matches(&status, expected);
            if matched.is_none() {
                debug!("vantage not yet at {expected}, retrying");
            }
            matched
        })
        .await
        .ok_or_else(|| VantageSwitchError::ConfirmTimeout {
            location: expected.to_string(),
        })
    }
}
