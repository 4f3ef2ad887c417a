//! Error taxonomy for the chat API, mapped onto HTTP statuses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Rejected request input; nothing was written.
    #[error("{0}")]
    Validation(&'static str),

    /// Unknown or already-deleted session for the requesting user.
    #[error("{0}")]
    NotFound(&'static str),

    /// Generation API transport failure or non-success status.
    #[error("Gemini API error: {0}")]
    Upstream(String),

    /// Database unavailable or query failure.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        // Upstream and storage detail stays in the server log; clients get
        // a generic message.
        let (status, message) = match &self {
            ChatError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            ChatError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            ChatError::Upstream(_) => {
                error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Gemini API error")
            }
            ChatError::Storage(_) => {
                error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
