//! Application error types and HTTP response mapping.
//!
//! The fetch core itself absorbs upstream failures into partial results, so
//! `AppError` only covers what the routing layer can still reject:
//! - `InvalidOwner` → 400
//! - `RateLimited` → 429

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid GitHub identifier: {0}")]
    InvalidOwner(String),

    #[error("{0}")]
    RateLimited(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidOwner(owner) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid GitHub identifier: {}", owner),
            ),
            AppError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
