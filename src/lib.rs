//! geo_probe library: vantage-point probing for content divergence.
//!
//! This library probes a single web endpoint from multiple geographic
//! vantage points (VPN relays) and detects content divergence between them.
//! For each location it resolves the target's authoritative name
//! infrastructure, forces DNS resolution through a location-specific
//! resolver, fetches the content pinned to each resolved destination
//! address, fingerprints the response body, and compares fingerprints across
//! vantage points.
//!
//! # Example
//!
//! ```no_run
//! use geo_probe::{run_probe, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     endpoint: Some("https://example.com".to_string()),
//!     locations: 3,
//!     ..Default::default()
//! };
//!
//! let report = run_probe(config).await?;
//! println!(
//!     "{} records across {} locations, {} divergent",
//!     report.records.len(),
//!     report.locations_probed,
//!     report.divergent
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime, a running Mullvad client for the
//! default vantage provider, and (optionally) a headless browser binary for
//! evidence capture.

#![warn(missing_docs)]

pub mod aggregate;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod evidence;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod report;
pub mod server;
pub mod utils;
pub mod vantage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use models::{Nameserver, ProbeRecord, TargetEndpoint};
pub use run::{run_probe, run_probe_with, ProbeReport};

// Internal run module (contains the orchestrator control loop)
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::aggregate::dedup_records;
    use crate::config::Config;
    use crate::dns::{init_name_resolution, HickoryNameService, NameService};
    use crate::error_handling::{ErrorType, ProbeStats};
    use crate::evidence;
    use crate::fetch;
    use crate::initialization::init_resolver;
    use crate::models::{Nameserver, ProbeRecord, TargetEndpoint};
    use crate::report::{baseline_divergent, render_report, sort_by_fingerprint_frequency};
    use crate::vantage::{MullvadProvider, ResolverBinding, VantageProvider};

    /// Results of a probing run.
    #[derive(Debug)]
    pub struct ProbeReport {
        /// Deduplicated probe records, sorted rare-fingerprint-first.
        pub records: Vec<ProbeRecord>,
        /// Number of raw records before deduplication.
        pub raw_records: usize,
        /// Number of locations actually visited.
        pub locations_probed: usize,
        /// Number of records whose fingerprint differs from the baseline.
        pub divergent: usize,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs a probe with the default vantage provider (Mullvad) and name
    /// service.
    ///
    /// This is the main entry point for the library.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing or unparsable, the
    /// provider cannot connect, alias resolution fails, or a location switch
    /// is not confirmed in time. Per-record failures (lookups, fetches,
    /// evidence) degrade single records and never fail the run.
    pub async fn run_probe(config: Config) -> Result<ProbeReport> {
        let provider = MullvadProvider::new();
        let names = HickoryNameService::new(init_resolver());
        run_probe_with(config, &provider, &names).await
    }

    /// Runs a probe against explicit vantage and name-service
    /// implementations.
    ///
    /// The default resolver is restored on every exit path, including fatal
    /// aborts mid-location.
    pub async fn run_probe_with(
        config: Config,
        provider: &dyn VantageProvider,
        names: &dyn NameService,
    ) -> Result<ProbeReport> {
        let start_time = std::time::Instant::now();
        let stats = ProbeStats::new();

        let result = probe_all_locations(&config, provider, names, &stats).await;

        // The binding must not survive the run, whether it succeeded or
        // aborted mid-location.
        if let Err(e) = provider.set_default_resolver().await {
            warn!("failed to restore default resolver: {e}");
            stats.increment(ErrorType::ResolverReset);
        }

        let (records, locations_probed) = result?;
        let raw_records = records.len();

        let mut records = dedup_records(records);
        info!(
            "Collected {} records ({} after dedup) across {} location(s)",
            raw_records,
            records.len(),
            locations_probed
        );

        let divergent = baseline_divergent(&records);
        sort_by_fingerprint_frequency(&mut records);
        render_report(&records);
        stats.log_summary();

        Ok(ProbeReport {
            records,
            raw_records,
            locations_probed,
            divergent,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// The control loop: locations x nameservers x nameserver addresses.
    ///
    /// Strictly sequential across the nameserver/address dimension: the
    /// resolver binding and the active location are host-wide resources, and
    /// interleaved use would corrupt other probes' results. Only the fetches
    /// of one binding run concurrently, since they depend solely on their
    /// pinned destination.
    async fn probe_all_locations(
        config: &Config,
        provider: &dyn VantageProvider,
        names: &dyn NameService,
        stats: &ProbeStats,
    ) -> Result<(Vec<ProbeRecord>, usize)> {
        let endpoint = config
            .endpoint
            .as_deref()
            .context("no endpoint configured")?;
        let mut target = TargetEndpoint::parse(endpoint)?;

        provider
            .connect()
            .await
            .context("vantage provider connection failed")?;

        init_name_resolution(&mut target, names)
            .await
            .context("name resolution initialization failed")?;

        let locations = provider
            .list_locations()
            .await
            .context("failed to list vantage locations")?;
        info!(
            "{} locations available, probing at most {}",
            locations.len(),
            config.locations
        );

        let mut records: Vec<ProbeRecord> = Vec::new();
        let mut visited = 0usize;

        for code in locations.keys() {
            if visited >= config.locations {
                break;
            }

            // Fatal on failure: every probe after an unconfirmed switch
            // would carry the wrong location code.
            let sources = provider
                .set_location(code)
                .await
                .with_context(|| format!("failed to switch vantage to {code}"))?;
            visited += 1;
            info!("Probing from {code} (sources {sources:?})");

            for ns_index in 0..target.nameservers.len() {
                let ns_host = target.nameservers[ns_index].host.clone();

                // Fresh per location: the answer may depend on the vantage.
                let addrs = match names.host_addrs(&ns_host).await {
                    Ok(addrs) => addrs,
                    Err(e) => {
                        warn!("skipping nameserver {ns_host}: {e}");
                        stats.increment(ErrorType::NameserverAddressLookup);
                        continue;
                    }
                };
                target.nameservers[ns_index].addrs = addrs.clone();

                for addr in addrs {
                    let binding = match ResolverBinding::bind(provider, addr).await {
                        Ok(binding) => binding,
                        Err(e) => {
                            warn!("skipping resolver {addr}: {e}");
                            stats.increment(ErrorType::ResolverBind);
                            continue;
                        }
                    };

                    let destinations =
                        match names.host_addrs_via(addr, &target.canonical_host).await {
                            Ok(destinations) => destinations,
                            Err(e) => {
                                warn!(
                                    "lookup of {} via {addr} failed: {e}",
                                    target.canonical_host
                                );
                                stats.increment(ErrorType::DestinationLookup);
                                release_binding(binding, stats).await;
                                continue;
                            }
                        };

                    let first_new = records.len();
                    for destination in &destinations {
                        records.push(ProbeRecord::new(
                            *destination,
                            sources.clone(),
                            code.clone(),
                            Nameserver {
                                host: ns_host.clone(),
                                addrs: vec![addr],
                            },
                        ));
                    }

                    let new_records = &mut records[first_new..];
                    fetch::fetch_all(&target, new_records, config.timeout_seconds, stats).await;
                    if config.capture_evidence {
                        evidence::capture_all(config, &target, new_records, stats).await;
                    }

                    release_binding(binding, stats).await;
                }
            }
        }

        Ok((records, visited))
    }

    async fn release_binding<'a>(binding: ResolverBinding<'a>, stats: &ProbeStats) {
        if let Err(e) = binding.release().await {
            warn!("{e}");
            stats.increment(ErrorType::ResolverReset);
        }
    }
}
