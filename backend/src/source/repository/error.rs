//! Error types for data-source operations.
//!
//! Every failure carries a structured [`ErrorContext`] so the caller can log
//! where the fetch went wrong before falling back to canned data.

use std::fmt;

/// Result type for data-source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Structured context for data-source errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_prediction")
    pub operation: Option<String>,
    /// The endpoint or backend involved
    pub endpoint: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether a later attempt could succeed
    pub retryable: bool,
}

impl ErrorContext {
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref endpoint) = self.endpoint {
            parts.push(format!("endpoint={}", endpoint));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for data-source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Could not reach the provider.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// The provider did not answer in time.
    #[error("Timeout error: {message} {context}")]
    TimeoutError {
        message: String,
        context: ErrorContext,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Upstream returned status {status}: {message} {context}")]
    UpstreamStatus {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// The response body could not be parsed.
    #[error("Decode error: {message} {context}")]
    DecodeError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl SourceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimeoutError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        let context = if status >= 500 {
            ErrorContext::default().retryable()
        } else {
            ErrorContext::default()
        };
        Self::UpstreamStatus {
            status,
            message: message.into(),
            context,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Check if this error is retryable.
    ///
    /// The core never retries on its own; this is informational for callers.
    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::TimeoutError { context, .. }
            | Self::UpstreamStatus { context, .. }
            | Self::DecodeError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::TimeoutError { context, .. }
            | Self::UpstreamStatus { context, .. }
            | Self::DecodeError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add or update the endpoint in the error context.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.context_mut().endpoint = Some(endpoint.into());
        self
    }

    /// Attach free-form details to the error context.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.context_mut().details = Some(details.into());
        self
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::decode(err.to_string())
    }
}

#[cfg(feature = "http-source")]
impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|u| u.to_string());
        let mapped = if err.is_timeout() {
            SourceError::timeout(err.to_string())
        } else if err.is_decode() {
            SourceError::decode(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::upstream_status(status.as_u16(), err.to_string())
        } else if err.is_connect() || err.is_request() {
            SourceError::connection(err.to_string())
        } else {
            SourceError::internal(err.to_string())
        };
        match endpoint {
            Some(endpoint) => mapped.with_endpoint(endpoint),
            None => mapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_is_retryable() {
        let err = SourceError::connection("refused");
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Connection error: refused"));
    }

    #[test]
    fn test_upstream_status_retryable_only_for_5xx() {
        assert!(SourceError::upstream_status(503, "unavailable").is_retryable());
        assert!(!SourceError::upstream_status(404, "missing").is_retryable());
    }

    #[test]
    fn test_context_display() {
        let err = SourceError::decode("bad json")
            .with_operation("fetch_prediction")
            .with_endpoint("https://example.invalid/predict");
        let msg = err.to_string();
        assert!(msg.contains("operation=fetch_prediction"));
        assert!(msg.contains("endpoint=https://example.invalid/predict"));
        assert!(!err.is_retryable());

        let err = err.with_details("9 byte body");
        assert_eq!(err.context().details.as_deref(), Some("9 byte body"));
        assert!(err.to_string().contains("details=9 byte body"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SourceError = parse_err.into();
        assert!(matches!(err, SourceError::DecodeError { .. }));
    }
}
