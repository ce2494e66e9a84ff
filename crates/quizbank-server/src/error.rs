//! API error types and HTTP response mapping
//!
//! Every failure leaves the server as `{"error": <message>}` with a status
//! matching its kind.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quizbank_types::ValidationError;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

pub const QUESTION_NOT_FOUND: &str = "Question not found";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Payload failed a declared constraint; only the first is reported.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Request could not be decoded (malformed JSON, non-integer id).
    #[error("{0}")]
    BadRequest(String),

    /// Domain failure carrying its own status code.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn question_not_found() -> Self {
        Self::Status {
            status: StatusCode::NOT_FOUND,
            message: QUESTION_NOT_FOUND.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Status { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(e) => e.first_message().to_string(),
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
