mod home;
mod robots;
mod session;
mod share;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL, EXPIRES, SERVER, VARY,
};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::application::routes::render_html;
use crate::application::routes::support::http_date;
use crate::application::state::AppState;
use crate::domain::routing::RoutingDecision;
use crate::presentation::web::templates::{RedirectTemplate, SharePageTemplate};
use crate::presentation::web::views::SharePageView;

/// Header carrying the running service version.
pub const VERSION_HEADER: &str = "x-ogshare-version";

/// Path the example image is served from.
pub const IMAGE_PATH: &str = "/public/image.png";

/// Generate a static asset handler that serves an embedded file with cache headers.
macro_rules! static_asset_str {
    ($name:ident, $path:literal, $content_type:literal) => {
        async fn $name() -> impl IntoResponse {
            (
                [
                    ("content-type", $content_type),
                    ("cache-control", "public, max-age=604800"),
                ],
                include_str!($path),
            )
        }
    };
}

/// Generate a static asset handler for binary files (e.g. images).
macro_rules! static_asset_bytes {
    ($name:ident, $path:literal, $content_type:literal) => {
        async fn $name() -> impl IntoResponse {
            (
                [
                    ("content-type", $content_type),
                    ("cache-control", "public, max-age=604800"),
                ],
                include_bytes!($path).as_slice(),
            )
        }
    };
}

pub(super) fn router() -> axum::Router<AppState> {
    // Routes crawlers are pointed at get uncacheable, permissive headers.
    let crawler_routes = axum::Router::new()
        .route("/share", get(share::share_page))
        .route("/session", get(session::session_page))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    CACHE_CONTROL,
                    HeaderValue::from_static("max-age=0, must-revalidate, private"),
                ))
                .layer(SetResponseHeaderLayer::overriding(EXPIRES, expires_now))
                .layer(SetResponseHeaderLayer::overriding(
                    SERVER,
                    HeaderValue::from_static(crate::VERSION_INFO.name),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static(VERSION_HEADER),
                    HeaderValue::from_static(crate::VERSION_INFO.version),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET, HEAD, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type, Accept, Origin, User-Agent"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    VARY,
                    HeaderValue::from_static("Accept-Encoding"),
                )),
        );

    axum::Router::new()
        .route("/", get(home::home_page))
        .route("/robots.txt", get(robots::robots_txt))
        .route(IMAGE_PATH, get(example_image))
        .route("/public/app.js", get(app_js))
        .merge(crawler_routes)
}

fn expires_now(_response: &Response) -> Option<HeaderValue> {
    HeaderValue::from_str(&http_date(Utc::now())).ok()
}

/// Render a decision: the redirect document when one is required, the share
/// page otherwise.
pub(super) fn render_decision(
    origin: &str,
    decision: RoutingDecision,
) -> Result<Response, StatusCode> {
    if let Some(target) = decision.redirect_target {
        return render_redirect(target);
    }

    let template = SharePageTemplate {
        version_info: &crate::VERSION_INFO,
        page: SharePageView::from_decision(decision, format!("{origin}{IMAGE_PATH}")),
    };
    render_html(template).map(IntoResponse::into_response)
}

pub(super) fn render_redirect(target: String) -> Result<Response, StatusCode> {
    let template = RedirectTemplate {
        version_info: &crate::VERSION_INFO,
        target,
    };
    render_html(template).map(IntoResponse::into_response)
}

static_asset_str!(app_js, "../../../../static/js/app.js", "text/javascript");
static_asset_bytes!(example_image, "../../../../static/img/image.png", "image/png");
