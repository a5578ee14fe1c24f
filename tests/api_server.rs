// API trigger tests against the probe router served on an ephemeral port.
// Requests that fail before any vantage work are deterministic offline, so
// these cover the HTTP surface: routing, request validation, and the error
// mapping of a failed probe.

use geo_probe::server::probe_router;
use geo_probe::Config;

async fn serve_router() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind api server");
    let addr = listener.local_addr().expect("local addr");
    let app = probe_router(Config::default());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("api server");
    });
    format!("http://{addr}/probe")
}

#[tokio::test]
async fn probe_with_invalid_endpoint_returns_500() {
    let url = serve_router().await;

    let response = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .body(r#"{"endpoint": "ftp://example.com"}"#)
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.expect("body");
    assert!(body.contains("probe failed"), "unexpected body: {body}");
}

#[tokio::test]
async fn probe_without_endpoint_field_is_rejected() {
    let url = serve_router().await;

    let response = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .body(r#"{"locations": 2}"#)
        .send()
        .await
        .expect("request succeeds");

    assert!(
        response.status().is_client_error(),
        "expected a client error, got {}",
        response.status()
    );
}

#[tokio::test]
async fn probe_route_rejects_get() {
    let url = serve_router().await;

    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}
