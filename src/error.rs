//! Error types for pagelinks
//!
//! Every fallible API in the crate returns `Result<T, Error>` where Error is
//! defined here. The pagination strategies themselves never fail on bad
//! query values (they fall back to defaults); the error path exists for
//! configuration, URL handling and mismatched strategy state.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for pagelinks
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // URL / Header Errors
    // ============================================================================
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {message}")]
    InvalidHeader { message: String },

    #[error("Unknown link relation: {relation}")]
    UnknownRelation { relation: String },

    #[error("Unknown pagination kind: {kind}")]
    UnknownKind { kind: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Pagination state mismatch: strategy is {expected}, state is {found}")]
    StateMismatch {
        expected: &'static str,
        found: &'static str,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unknown relation error
    pub fn unknown_relation(relation: impl Into<String>) -> Self {
        Self::UnknownRelation {
            relation: relation.into(),
        }
    }

    /// Create an unknown pagination kind error
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    /// Create a state mismatch error
    pub fn state_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::StateMismatch { expected, found }
    }

    /// HTTP status code used when this error is reported by the server
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidUrl(_)
            | Error::InvalidHeader { .. }
            | Error::UnknownRelation { .. }
            | Error::UnknownKind { .. } => StatusCode::BAD_REQUEST,
            Error::FileNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias for pagelinks
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_value("page_size", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'page_size': must be greater than 0"
        );

        let err = Error::state_mismatch("page_number", "offset_limit");
        assert_eq!(
            err.to_string(),
            "Pagination state mismatch: strategy is page_number, state is offset_limit"
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(
            Error::unknown_kind("cursor").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::unknown_relation("self").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::FileNotFound {
                path: "x.yaml".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::state_mismatch("page_number", "offset_limit").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
