//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::source::SourceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Prediction source error
    Source(SourceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Source(e) => {
                let status = if e.is_retryable() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                };
                let mut error = ApiError::new("SOURCE_ERROR", e.to_string());
                if let Some(endpoint) = e.context().endpoint.clone() {
                    error = error.with_details(format!("endpoint: {}", endpoint));
                }
                (status, error)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_status_mapping() {
        let retryable = AppError::from(SourceError::timeout("slow")).into_response();
        assert_eq!(retryable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let permanent = AppError::from(
            SourceError::decode("bad body").with_endpoint("http://127.0.0.1/predict"),
        )
        .into_response();
        assert_eq!(permanent.status(), StatusCode::BAD_GATEWAY);
    }
}
