//! The `{success, ...payload | error}` envelope shared by every endpoint.

use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Envelope {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(err: &AppError) -> Self {
        Envelope {
            success: false,
            payload: None,
            error: Some(err.to_string()),
        }
    }
}

impl<T> From<Result<T, AppError>> for Envelope<T> {
    fn from(outcome: Result<T, AppError>) -> Self {
        match outcome {
            Ok(payload) => Envelope::success(payload),
            Err(err) => Envelope::failure(&err),
        }
    }
}
