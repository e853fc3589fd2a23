//! Structured errors for the reelscore API.
//!
//! Every failure is a 500 with a plain `{ "error": "..." }` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reelscore_core::Error;
use serde::Serialize;

/// Errors surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The dataset file could not be read.
    #[error("Failed to read the file")]
    ReadFailed(#[source] Error),

    /// The dataset file is not a JSON array of objects.
    #[error("Failed to parse JSON")]
    ParseFailed(#[source] Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::DatasetParse(_) => ApiError::ParseFailed(err),
            _ => ApiError::ReadFailed(err),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let source = match &self {
            ApiError::ReadFailed(e) | ApiError::ParseFailed(e) => e.to_string(),
        };
        tracing::error!(error = %source, "{}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
