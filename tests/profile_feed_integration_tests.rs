mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use zoraverse::{
    dashboard::state::{DashboardHandle, StateEvent},
    jobs::profile_poll::start_profile_poll_job,
    services::profile_feed::{FetchError, HttpProfileFeed, ProfileSource},
};

use crate::common::{StubUpstream, closed_port_url, profiles_body};

fn two_profiles() -> String {
    profiles_body(json!([
        { "address": "0xa", "name": "Alpha", "marketCap": 5000, "followersCount": 10 },
        { "address": "0xb", "name": "Beta", "marketCap": null, "createdAt": "2025-01-01T00:00:00Z" }
    ]))
}

fn feed(base_url: &str) -> HttpProfileFeed {
    HttpProfileFeed::new(base_url, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_profiles_success() {
    let stub = StubUpstream::new(vec![(StatusCode::OK, two_profiles())]);
    let base_url = stub.spawn().await;

    let profiles = feed(&base_url).fetch_profiles().await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].address, "0xa");
    assert_eq!(profiles[0].market_cap, Some(5000.0));
    assert_eq!(profiles[1].market_cap, None);
    assert_eq!(stub.paths(), vec!["/profiles".to_string()]);
}

#[tokio::test]
async fn test_fetch_profiles_with_float_counts() {
    let stub = StubUpstream::new(vec![(
        StatusCode::OK,
        profiles_body(json!([
            { "address": "0xa", "followersCount": 1200.0, "postsCount": 3.0 },
            { "address": "0xb", "holdersCount": 1.5e3 }
        ])),
    )]);
    let base_url = stub.spawn().await;

    let profiles = feed(&base_url).fetch_profiles().await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].followers_count, Some(1200));
    assert_eq!(profiles[0].posts_count, Some(3));
    assert_eq!(profiles[1].holders_count, Some(1500));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let stub = StubUpstream::new(vec![(StatusCode::OK, two_profiles())]);
    let base_url = stub.spawn().await;

    let profiles = feed(&format!("{}/", base_url)).fetch_profiles().await.unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(stub.paths(), vec!["/profiles".to_string()]);
}

#[tokio::test]
async fn test_non_success_status_is_protocol_error() {
    let stub = StubUpstream::new(vec![(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"boom"}"#.to_string(),
    )]);
    let base_url = stub.spawn().await;

    let err = feed(&base_url).fetch_profiles().await.unwrap_err();

    assert!(err.is_protocol());
    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_profiles_field_is_body_error() {
    let stub = StubUpstream::new(vec![(StatusCode::OK, r#"{"count": 3}"#.to_string())]);
    let base_url = stub.spawn().await;

    let err = feed(&base_url).fetch_profiles().await.unwrap_err();

    assert!(matches!(err, FetchError::Body(_)));
}

#[tokio::test]
async fn test_invalid_json_is_body_error() {
    let stub = StubUpstream::new(vec![(StatusCode::OK, "<html>oops</html>".to_string())]);
    let base_url = stub.spawn().await;

    let err = feed(&base_url).fetch_profiles().await.unwrap_err();

    assert!(matches!(err, FetchError::Body(_)));
}

#[tokio::test]
async fn test_closed_port_is_network_error() {
    let base_url = closed_port_url().await;

    let err = feed(&base_url).fetch_profiles().await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
    assert!(!err.is_protocol());
}

/// Wait for the next fetch outcome, skipping bookkeeping events
async fn next_outcome(rx: &mut tokio::sync::broadcast::Receiver<StateEvent>) -> StateEvent {
    loop {
        match rx.recv().await.unwrap() {
            StateEvent::FetchStarted | StateEvent::FilterChanged => continue,
            outcome => return outcome,
        }
    }
}

#[tokio::test]
async fn test_poll_job_keeps_last_snapshot_when_upstream_fails() {
    let stub = StubUpstream::new(vec![
        (StatusCode::OK, two_profiles()),
        (StatusCode::SERVICE_UNAVAILABLE, "down".to_string()),
    ]);
    let base_url = stub.spawn().await;

    let dashboard = DashboardHandle::default();
    let mut rx = dashboard.subscribe();
    let poll = start_profile_poll_job(
        Arc::new(feed(&base_url)),
        dashboard.clone(),
        Duration::from_millis(50),
    );

    let first = timeout(Duration::from_secs(5), next_outcome(&mut rx)).await.unwrap();
    assert_eq!(first, StateEvent::SnapshotReplaced { count: 2 });

    let second = timeout(Duration::from_secs(5), next_outcome(&mut rx)).await.unwrap();
    assert!(matches!(second, StateEvent::FetchFailed(FetchError::Status { status: 503, .. })));

    let state = dashboard.snapshot();
    assert_eq!(state.profiles().len(), 2);
    assert!(!state.is_loading());
    assert!(state.error().is_some());
    assert!(state.last_updated().is_some());

    poll.shutdown().await;
    assert!(stub.hits() >= 2);
}

#[tokio::test]
async fn test_poll_job_refresh_recovers_after_failure() {
    let stub = StubUpstream::new(vec![
        (StatusCode::BAD_GATEWAY, "nope".to_string()),
        (StatusCode::OK, two_profiles()),
    ]);
    let base_url = stub.spawn().await;

    let dashboard = DashboardHandle::default();
    let mut rx = dashboard.subscribe();
    // Interval long enough that only the manual refresh can trigger the retry
    let poll = start_profile_poll_job(
        Arc::new(feed(&base_url)),
        dashboard.clone(),
        Duration::from_secs(3600),
    );

    let first = timeout(Duration::from_secs(5), next_outcome(&mut rx)).await.unwrap();
    assert!(matches!(first, StateEvent::FetchFailed(_)));
    assert!(dashboard.snapshot().profiles().is_empty());

    assert!(poll.refresh());
    let second = timeout(Duration::from_secs(5), next_outcome(&mut rx)).await.unwrap();
    assert_eq!(second, StateEvent::SnapshotReplaced { count: 2 });

    let state = dashboard.snapshot();
    assert!(state.error().is_none());
    assert_eq!(state.visible_profiles().len(), 2);

    poll.shutdown().await;
}
