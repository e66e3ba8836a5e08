use axum::http::StatusCode;

use crate::app::errors::AppError;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
