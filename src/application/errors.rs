use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::domain::RepositoryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session store failure: {0}")]
    Repository(#[from] RepositoryError),
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// Log an application error and collapse it into a 500. Store failures are
/// fatal for the request and are not retried.
pub fn map_app_error(err: AppError) -> StatusCode {
    error!(error = %err, "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
