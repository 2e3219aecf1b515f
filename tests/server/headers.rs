use chrono::DateTime;
use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL, EXPIRES, HeaderMap, SERVER, STRICT_TRANSPORT_SECURITY, VARY,
};

use crate::helpers::{get_page, spawn_app};

fn header<'a>(headers: &'a HeaderMap, name: impl reqwest::header::AsHeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn assert_crawler_headers(headers: &HeaderMap) {
    assert_eq!(
        header(headers, CACHE_CONTROL),
        "max-age=0, must-revalidate, private"
    );
    assert_eq!(header(headers, SERVER), "ogshare");
    assert_eq!(
        header(headers, "x-ogshare-version"),
        env!("CARGO_PKG_VERSION")
    );
    assert!(header(headers, STRICT_TRANSPORT_SECURITY).starts_with("max-age="));
    assert_eq!(header(headers, ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    assert!(header(headers, ACCESS_CONTROL_ALLOW_METHODS).contains("GET"));
    assert!(!header(headers, ACCESS_CONTROL_ALLOW_HEADERS).is_empty());
    assert!(
        headers
            .get_all(VARY)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.eq_ignore_ascii_case("accept-encoding")),
        "missing Vary: Accept-Encoding"
    );

    let expires = header(headers, EXPIRES);
    assert!(expires.ends_with(" GMT"), "unexpected Expires: {expires}");
    assert!(
        DateTime::parse_from_rfc2822(expires).is_ok(),
        "Expires is not an RFC 1123 date: {expires}"
    );
}

#[tokio::test]
async fn share_route_sends_crawler_headers() {
    let app = spawn_app().await;

    let (_, headers, _) = get_page(&app, "/share?ssid=B&qv=A").await;

    assert_crawler_headers(&headers);
}

#[tokio::test]
async fn share_redirect_sends_crawler_headers() {
    let app = spawn_app().await;

    let (_, headers, _) = get_page(&app, "/share?qv=A&ssid=B").await;

    assert_crawler_headers(&headers);
}

#[tokio::test]
async fn session_route_sends_crawler_headers() {
    let app = spawn_app().await;

    let (_, headers, _) = get_page(&app, "/session?ssid=B").await;

    assert_crawler_headers(&headers);
}

#[tokio::test]
async fn home_keeps_default_caching() {
    let app = spawn_app().await;

    let (_, headers, _) = get_page(&app, "/").await;

    assert!(headers.get(EXPIRES).is_none());
    assert!(headers.get(STRICT_TRANSPORT_SECURITY).is_some());
}
