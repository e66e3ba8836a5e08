//! Error taxonomy at the HTTP boundary.
//!
//! Domain outcomes a handler knows how to present (validation failures,
//! duplicate email, bad credentials) never reach this type; they are turned
//! into a re-rendered form with a 422 inside the handler.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use snippetbox_infra::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or expired snippet, unknown route, malformed id.
    #[error("not found")]
    NotFound,

    /// Undecodable form body, failed CSRF check.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything unexpected. Logged in full, reported to the client as a bare 500.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoRecord => AppError::NotFound,
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("session store"))
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("template rendering"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("template data"))
    }
}

/// Plain-text response carrying only the canonical reason phrase.
pub fn status_response(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("Error");
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{reason}\n"),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => status_response(StatusCode::NOT_FOUND),
            AppError::BadRequest(msg) => {
                tracing::debug!(reason = %msg, "rejecting bad request");
                status_response(StatusCode::BAD_REQUEST)
            }
            AppError::Internal(err) => {
                tracing::error!(
                    error = ?err,
                    backtrace = %err.backtrace(),
                    "internal server error"
                );
                status_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_taxonomy() {
        let not_found: AppError = StoreError::NoRecord.into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let other: AppError = StoreError::Poisoned.into();
        assert_eq!(other.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_does_not_leak_reason() {
        let res = AppError::bad_request("csrf token mismatch").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
