use ogshare::domain::routing::MetadataPolicy;
use reqwest::StatusCode;

use crate::helpers::{
    get_metadata, get_page, spawn_app, spawn_app_with_failing_store, spawn_app_with_policy,
    spawn_app_without_sessions,
};

#[tokio::test]
async fn unknown_session_redirects_with_ssid_only() {
    let app = spawn_app().await;

    let (metadata, _) = get_metadata(&app, "/session?ssid=Y").await;

    assert_eq!(metadata.meta_refresh, Some(app.page_url("/share?ssid=Y")));
    assert_eq!(metadata.og_url, None);
}

#[tokio::test]
async fn known_session_redirects_with_swapped_order() {
    let app = spawn_app_with_policy(MetadataPolicy::SessionEndpoint).await;
    get_metadata(&app, "/share?ssid=Y&qv=X").await;

    let (metadata, _) = get_metadata(&app, "/session?ssid=Y").await;

    assert_eq!(
        metadata.meta_refresh,
        Some(app.page_url("/share?qv=X&ssid=Y"))
    );
}

#[tokio::test]
async fn supplied_parameters_are_swapped() {
    let app = spawn_app().await;

    let (qv_first, _) = get_metadata(&app, "/session?qv=X&ssid=Y").await;
    let (ssid_first, _) = get_metadata(&app, "/session?ssid=Y&qv=X").await;

    assert_eq!(
        qv_first.meta_refresh,
        Some(app.page_url("/share?ssid=Y&qv=X"))
    );
    assert_eq!(
        ssid_first.meta_refresh,
        Some(app.page_url("/share?qv=X&ssid=Y"))
    );
}

#[tokio::test]
async fn session_without_parameters_redirects_to_share() {
    let app = spawn_app().await;

    let (metadata, _) = get_metadata(&app, "/session").await;

    assert_eq!(metadata.meta_refresh, Some(app.page_url("/share")));
}

#[tokio::test]
async fn session_resolution_disabled_never_resolves() {
    let app = spawn_app_without_sessions().await;
    get_metadata(&app, "/share?ssid=Y&qv=X").await;

    let (metadata, _) = get_metadata(&app, "/session?ssid=Y").await;

    assert_eq!(metadata.meta_refresh, Some(app.page_url("/share?ssid=Y")));
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let app = spawn_app_with_failing_store().await;

    let (status, _, _) = get_page(&app, "/session?ssid=Y").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
