//! HTTP API trigger for the probing pipeline.
//!
//! Exposes one endpoint:
//! - `POST /probe` - accepts a target endpoint and an optional location
//!   count, runs the pipeline synchronously, and returns one entry per
//!   deduplicated probe record
//!
//! The vantage location and the active resolver are host-wide resources, so
//! probes are serialized behind a lock: a request received while a probe is
//! running waits its turn.

mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::run_probe;

pub use types::{ProbeRequest, ProbeResponseEntry};

/// Shared state of the API server.
#[derive(Clone)]
struct ApiState {
    base: Arc<Config>,
    probe_gate: Arc<Mutex<()>>,
}

/// Builds the API router.
///
/// `base` supplies everything a request does not override (location count,
/// evidence settings, timeouts).
pub fn probe_router(base: Config) -> Router {
    let state = ApiState {
        base: Arc::new(base),
        probe_gate: Arc::new(Mutex::new(())),
    };
    Router::new()
        .route("/probe", post(probe_handler))
        .with_state(state)
}

/// Creates and starts the API server.
pub async fn start_api_server(port: u16, base: Config) -> Result<(), anyhow::Error> {
    let app = probe_router(base);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}"))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {port}: {e}"))?;

    log::info!("API server listening on http://127.0.0.1:{port}/probe");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {e}"))?;

    Ok(())
}

async fn probe_handler(State(state): State<ApiState>, Json(request): Json<ProbeRequest>) -> Response {
    // One probe at a time: the pipeline mutates host-wide vantage state.
    let _gate = state.probe_gate.lock().await;

    let mut config = (*state.base).clone();
    config.endpoint = Some(request.endpoint);
    if let Some(locations) = request.locations {
        config.locations = locations;
    }

    match run_probe(config).await {
        Ok(report) => {
            let entries: Vec<ProbeResponseEntry> = report
                .records
                .iter()
                .map(ProbeResponseEntry::from_record)
                .collect();
            Json(entries).into_response()
        }
        Err(e) => {
            log::warn!("probe request failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("probe failed: {e:#}"),
            )
                .into_response()
        }
    }
}
