use ogshare::domain::crawlers;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::helpers::{assert_full_page, get_metadata, get_page, spawn_app};

#[tokio::test]
async fn homepage_advertises_its_own_url() {
    let app = spawn_app().await;

    let (metadata, body) = get_metadata(&app, "/").await;

    assert_full_page(&body);
    assert_eq!(metadata.og_url, Some(app.page_url("/")));
    assert_eq!(metadata.meta_refresh, None);
    assert!(body.contains("Path-based"), "home should be labelled path-based");
    assert!(body.contains(&app.page_url("/public/image.png")));
}

#[tokio::test]
async fn robots_txt_is_plain_text_and_stable() {
    let app = spawn_app().await;

    let (status, headers, first) = get_page(&app, "/robots.txt").await;
    let (_, _, second) = get_page(&app, "/robots.txt").await;

    assert_eq!(status, StatusCode::OK);
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");
    assert_eq!(first, second);
    assert_eq!(first, crawlers::robots_txt());
    assert!(first.contains("User-agent: facebookexternalhit/1.1\nAllow: /"));
}

#[tokio::test]
async fn example_image_is_served() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.page_url("/public/image.png"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    let bytes = response.bytes().await.expect("Failed to read body");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[tokio::test]
async fn app_script_is_served() {
    let app = spawn_app().await;

    let (status, _, body) = get_page(&app, "/public/app.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("image-container"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = spawn_app().await;

    let (status, _, _) = get_page(&app, "/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
