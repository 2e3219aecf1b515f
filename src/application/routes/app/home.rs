use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::Response;

use super::render_decision;
use crate::application::routes::support::request_origin;
use crate::application::state::AppState;
use crate::domain::routing::RequestTarget;

#[tracing::instrument(skip(state, headers))]
pub(crate) async fn home_page(
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

    let decision = state.reconciler.home(&target);
    render_decision(&origin, decision)
}
