use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::response::Envelope;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only `NotFound` maps to a distinct HTTP status. Every other failure is
/// degraded to a `{"success": false, "error": ...}` body so the automation
/// client consuming these endpoints can branch on the envelope alone.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidParameter(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidParameter(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(msg) => {
                let body = Json(json!({
                    "error": {
                        "code": "NOT_FOUND",
                        "message": msg
                    }
                }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            AppError::InvalidParameter(msg) => {
                tracing::warn!("Rejected request parameter: {msg}");
                Json(Envelope::<()>::failure(&self)).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                Json(Envelope::<()>::failure(&self)).into_response()
            }
        }
    }
}
