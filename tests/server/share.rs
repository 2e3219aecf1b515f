use ogshare::domain::routing::MetadataPolicy;
use reqwest::StatusCode;

use crate::helpers::{
    get_metadata, get_page, spawn_app, spawn_app_with_failing_store, spawn_app_with_policy,
};

#[tokio::test]
async fn share_without_parameters_advertises_page_url() {
    let app = spawn_app().await;

    let (metadata, body) = get_metadata(&app, "/share").await;

    assert_eq!(metadata.og_url, Some(app.page_url("/share")));
    assert_eq!(metadata.meta_refresh, None);
    assert!(!body.contains("differs from the URL"));
}

#[tokio::test]
async fn share_with_only_qv_keeps_only_qv() {
    let app = spawn_app().await;

    let (metadata, body) = get_metadata(&app, "/share?qv=A").await;

    assert_eq!(metadata.og_url, Some(app.page_url("/share?qv=A")));
    assert_eq!(metadata.meta_refresh, None);
    assert!(body.contains("(qv=A, ssid=none)"));
}

#[tokio::test]
async fn share_with_only_ssid_keeps_only_ssid() {
    let app = spawn_app().await;

    let (metadata, _) = get_metadata(&app, "/share?ssid=B").await;

    assert_eq!(metadata.og_url, Some(app.page_url("/share?ssid=B")));
    assert_eq!(metadata.meta_refresh, None);
}

#[tokio::test]
async fn qv_first_redirects_to_ssid_first() {
    let app = spawn_app().await;

    let (metadata, _) = get_metadata(&app, "/share?qv=A&ssid=B").await;

    assert_eq!(
        metadata.meta_refresh,
        Some(app.page_url("/share?ssid=B&qv=A"))
    );
    // The redirect document replaces the page, tags and all.
    assert_eq!(metadata.og_url, None);
}

#[tokio::test]
async fn ssid_first_renders_with_qv_dropped_from_og_url() {
    let app = spawn_app().await;

    let (metadata, body) = get_metadata(&app, "/share?ssid=B&qv=A").await;

    assert_eq!(metadata.meta_refresh, None);
    assert_eq!(metadata.og_url, Some(app.page_url("/share?ssid=B")));
    assert_eq!(metadata.canonical, Some(app.page_url("/share?ssid=B")));
    assert!(body.contains("differs from the URL"));
}

#[tokio::test]
async fn session_endpoint_policy_advertises_session_route() {
    let app = spawn_app_with_policy(MetadataPolicy::SessionEndpoint).await;

    let (metadata, _) = get_metadata(&app, "/share?ssid=B&qv=A").await;

    assert_eq!(metadata.og_url, Some(app.page_url("/session?ssid=B")));
}

#[tokio::test]
async fn share_with_both_parameters_stores_mapping() {
    let app = spawn_app().await;

    get_metadata(&app, "/share?qv=X&ssid=Y").await;
    assert_eq!(
        app.sessions().get("Y").await.expect("lookup failed").as_deref(),
        Some("X")
    );

    get_metadata(&app, "/share?ssid=Y&qv=Z").await;
    assert_eq!(
        app.sessions().get("Y").await.expect("lookup failed").as_deref(),
        Some("Z")
    );
}

#[tokio::test]
async fn share_with_one_parameter_stores_nothing() {
    let app = spawn_app().await;

    get_metadata(&app, "/share?ssid=Y").await;

    assert_eq!(app.sessions().get("Y").await.expect("lookup failed"), None);
}

#[tokio::test]
async fn repeated_share_request_is_idempotent() {
    let app = spawn_app().await;

    let (_, first) = get_metadata(&app, "/share?qv=X&ssid=Y").await;
    let after_first = app.sessions().get_mapping("Y").await.expect("lookup failed");
    let (_, second) = get_metadata(&app, "/share?qv=X&ssid=Y").await;
    let after_second = app.sessions().get_mapping("Y").await.expect("lookup failed");

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let app = spawn_app_with_failing_store().await;

    let (status, _, _) = get_page(&app, "/share?ssid=Y&qv=X").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Requests that never touch the store are unaffected.
    let (status, _, _) = get_page(&app, "/share?ssid=Y").await;
    assert_eq!(status, StatusCode::OK);
}
