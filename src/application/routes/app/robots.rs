use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::domain::crawlers;

pub(crate) async fn robots_txt() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        crawlers::robots_txt(),
    )
}
