//! Error types for front-sync
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Callers usually only need [`Error::kind`]: exhausted retries, cancellation
//! and a failing first call each call for a different recovery strategy.

use thiserror::Error;

/// The main error type for front-sync
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No API token configured")]
    MissingToken,

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Collection Errors
    // ============================================================================
    #[error("Fetch failed after {attempts} attempts: {source}")]
    FetchFailed {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or timeout
    Transport,
    /// Non-2xx response
    Validation,
    /// Response body did not match the expected shape
    Decoding,
    /// Retry budget exhausted on a follow-up page
    FetchFailed,
    /// The driving call was cancelled
    Cancelled,
    /// Bad or missing configuration
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Wrap the last error of an exhausted retry loop
    pub fn fetch_failed(attempts: u32, last: Error) -> Self {
        Self::FetchFailed {
            attempts,
            source: Box::new(last),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(e) if e.is_decode() => ErrorKind::Decoding,
            Error::Http(_) | Error::Timeout { .. } | Error::InvalidUrl(_) => ErrorKind::Transport,
            Error::HttpStatus { .. } | Error::RateLimited { .. } => ErrorKind::Validation,
            Error::Decode { .. } | Error::JsonParse(_) => ErrorKind::Decoding,
            Error::FetchFailed { .. } => ErrorKind::FetchFailed,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Config { .. } | Error::MissingToken | Error::YamlParse(_) | Error::Io(_) => {
                ErrorKind::Config
            }
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if this error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Check if this error is an exhausted retry budget
    pub fn is_fetch_failed(&self) -> bool {
        matches!(self, Error::FetchFailed { .. })
    }

    /// The underlying cause of a `FetchFailed`, or `self` otherwise
    pub fn last_error(&self) -> &Error {
        match self {
            Error::FetchFailed { source, .. } => source.last_error(),
            other => other,
        }
    }

    /// Check if retrying the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for front-sync
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::fetch_failed(3, Error::http_status(503, "unavailable"));
        assert_eq!(
            err.to_string(),
            "Fetch failed after 3 attempts: HTTP 503: unavailable"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::Timeout { timeout_ms: 10 }.kind(), ErrorKind::Transport);
        assert_eq!(Error::http_status(401, "").kind(), ErrorKind::Validation);
        assert_eq!(Error::decode("bad").kind(), ErrorKind::Decoding);
        assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(Error::MissingToken.kind(), ErrorKind::Config);
        assert_eq!(
            Error::fetch_failed(3, Error::Cancelled).kind(),
            ErrorKind::FetchFailed
        );
    }

    #[test]
    fn test_fetch_failed_keeps_last_error() {
        let err = Error::fetch_failed(3, Error::http_status(500, "boom"));
        assert!(err.is_fetch_failed());
        assert!(!err.is_cancelled());
        assert!(matches!(
            err.last_error(),
            Error::HttpStatus { status: 500, .. }
        ));

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::http_status(401, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }
}
