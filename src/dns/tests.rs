//! DNS module tests.
//!
//! These exercise the pure parts of name resolution (suffix walk, address
//! filtering); resolver-backed lookups are covered by the hickory
//! implementation at runtime and deliberately not tied to live DNS here.

use std::net::IpAddr;

use super::*;
use crate::error_handling::ResolutionError;

#[test]
fn test_suffix_candidates_walks_most_specific_first() {
    assert_eq!(
        suffix_candidates("a.b.example.com"),
        vec![
            "a.b.example.com".to_string(),
            "b.example.com".to_string(),
            "example.com".to_string(),
        ]
    );
}

#[test]
fn test_suffix_candidates_trailing_dot() {
    assert_eq!(
        suffix_candidates("example.com."),
        vec!["example.com".to_string()]
    );
}

#[test]
fn test_suffix_candidates_single_label() {
    assert_eq!(suffix_candidates("localhost"), vec!["localhost".to_string()]);
}

#[tokio::test]
async fn test_first_nonempty_suffix_stops_at_first_hit() {
    let candidates = suffix_candidates("a.b.example.com");
    let result = first_nonempty_suffix(&candidates, |domain| async move {
        match domain.as_str() {
            "a.b.example.com" => Ok(Vec::new()),
            "b.example.com" => Ok(Vec::new()),
            "example.com" => Ok(vec!["ns1.example.com".to_string()]),
            other => panic!("walk continued past the first hit: {other}"),
        }
    })
    .await;
    assert_eq!(result, vec!["ns1.example.com".to_string()]);
}

#[tokio::test]
async fn test_first_nonempty_suffix_skips_failures() {
    let candidates = vec!["broken.example.com".to_string(), "example.com".to_string()];
    let result = first_nonempty_suffix(&candidates, |domain| async move {
        if domain == "broken.example.com" {
            Err(ResolutionError::NameserverLookup {
                domain,
                reason: "timed out".to_string(),
            })
        } else {
            Ok(vec!["ns1.example.com".to_string()])
        }
    })
    .await;
    assert_eq!(result, vec!["ns1.example.com".to_string()]);
}

#[tokio::test]
async fn test_first_nonempty_suffix_exhausted_is_empty() {
    let candidates = suffix_candidates("a.example.com");
    let result = first_nonempty_suffix(&candidates, |_| async { Ok(Vec::new()) }).await;
    assert!(result.is_empty());
}

#[test]
fn test_retain_ipv4_drops_v6() {
    let mut addrs: Vec<IpAddr> = vec![
        "192.0.2.1".parse().unwrap(),
        "2001:db8::1".parse().unwrap(),
        "192.0.2.2".parse().unwrap(),
    ];
    retain_ipv4(&mut addrs);
    assert_eq!(
        addrs,
        vec![
            "192.0.2.1".parse::<IpAddr>().unwrap(),
            "192.0.2.2".parse::<IpAddr>().unwrap(),
        ]
    );
}

#[test]
fn test_retain_ipv4_is_idempotent() {
    let mut addrs: Vec<IpAddr> = vec![
        "192.0.2.1".parse().unwrap(),
        "2001:db8::1".parse().unwrap(),
    ];
    retain_ipv4(&mut addrs);
    let once = addrs.clone();
    retain_ipv4(&mut addrs);
    assert_eq!(addrs, once);
}

#[test]
fn test_retain_ipv4_empty_result_is_valid() {
    let mut addrs: Vec<IpAddr> = vec!["2001:db8::1".parse().unwrap()];
    retain_ipv4(&mut addrs);
    assert!(addrs.is_empty());
}
