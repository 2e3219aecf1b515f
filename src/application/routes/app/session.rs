use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::Response;

use super::render_redirect;
use crate::application::errors::{AppError, map_app_error};
use crate::application::routes::support::request_origin;
use crate::application::state::AppState;
use crate::domain::routing::RequestTarget;

/// Session-resolution route. Never renders the share page; it always answers
/// with a meta-refresh into `/share`.
#[tracing::instrument(skip(state, headers))]
pub(crate) async fn session_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, StatusCode> {
    let origin = request_origin(&state, &headers);
    let target = RequestTarget {
        origin: &origin,
        path: uri.path(),
        raw_query: uri.query(),
    };

    let redirect = state
        .reconciler
        .resolve_session(&target)
        .await
        .map_err(|err| map_app_error(AppError::from(err)))?;

    render_redirect(redirect.target)
}
