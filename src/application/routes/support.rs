use axum::http::HeaderMap;
use axum::http::header::HOST;
use chrono::{DateTime, Utc};

use crate::application::state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Origin (`scheme://host`) used to build every URL the service emits.
///
/// A configured public URL wins; otherwise the request's `Host` header and
/// `X-Forwarded-Proto` are used, so the service reproduces correctly behind a
/// tunnel or reverse proxy.
pub(crate) fn request_origin(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(public_url) = &state.public_url {
        return public_url.clone();
    }

    let scheme = header_str(headers, FORWARDED_PROTO)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");
    let host = header_str(headers, HOST.as_str())
        .filter(|value| !value.is_empty())
        .unwrap_or(state.default_host.as_str());

    format!("{scheme}://{host}")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// RFC 1123 date as used by `Expires`.
pub(crate) fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
