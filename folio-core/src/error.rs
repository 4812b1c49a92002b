//! Error types for the Folio core library.
//!
//! Chat and resume calls never hand these to the caller directly: the HTTP
//! client folds them into a [`ChatResponse`](crate::models::ChatResponse) or an
//! absent resume. They surface as-is from configuration loading, file access
//! and the CLI.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1003-E1099 | Config | Config file parsing and invalid values |
//! | E2001-E2099 | API | Transport, decoding, and server-reported failures |
//! | E3001-E3099 | Resume | Resume document loading errors |
//! | E4001-E4099 | Session | Chat session submission errors |
//! | E9003-E9099 | General | IO and serialization errors |

use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

use crate::client::{CONNECTIVITY_FALLBACK, GENERIC_FAILURE_FALLBACK};

/// The main error type for the Folio core library.
#[derive(Debug, Error)]
pub enum FolioError {
    // ========================================================================
    // Configuration Errors (E1003-E1099)
    // ========================================================================
    /// Configuration file parse error
    #[error("[E1003] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Invalid configuration value
    #[error("[E1004] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // API Errors (E2001-E2099)
    // ========================================================================
    /// Request could not be built or sent
    #[error("[E2001] API request failed: {0}")]
    ApiRequestFailed(String),

    /// Response body could not be decoded
    #[error("[E2002] Failed to parse API response: {0}")]
    ApiParseError(String),

    /// Backend could not be reached
    #[error("[E2003] API service unavailable: {0}")]
    ApiServiceUnavailable(String),

    /// Underlying transport gave up waiting
    #[error("[E2004] API request timed out: {0}")]
    ApiTimeout(String),

    /// Backend answered with a non-success status
    #[error("[E2005] Server returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    ServerReported { status: u16, message: Option<String> },

    // ========================================================================
    // Resume Errors (E3001-E3099)
    // ========================================================================
    /// No resume document is available from the configured source
    #[error("[E3001] Resume data unavailable: {0}")]
    ResumeUnavailable(String),

    /// Resume document exists but is malformed
    #[error("[E3002] Failed to parse resume from {origin}: {message}")]
    ResumeParseError { origin: String, message: String },

    // ========================================================================
    // Session Errors (E4001-E4099)
    // ========================================================================
    /// Blank message submitted
    #[error("[E4001] Message is empty")]
    EmptyMessage,

    // ========================================================================
    // General Errors (E9003-E9099)
    // ========================================================================
    /// IO error
    #[error("[E9003] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("[E9004] Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for Folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for FolioError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FolioError::ApiTimeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            FolioError::ApiServiceUnavailable(err.to_string())
        } else if err.is_status() {
            FolioError::ServerReported {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: None,
            }
        } else if err.is_decode() {
            FolioError::ApiParseError(err.to_string())
        } else {
            FolioError::ApiRequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for FolioError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => FolioError::InvalidConfigValue {
                key,
                message: "Key not found".to_string(),
            },
            config::ConfigError::FileParse { uri, cause } => FolioError::ConfigParseError(
                format!("Failed to parse {}: {}", uri.unwrap_or_default(), cause),
            ),
            config::ConfigError::Type {
                origin,
                unexpected,
                expected,
                key,
            } => FolioError::InvalidConfigValue {
                key: key.unwrap_or_else(|| origin.map(|o| o.to_string()).unwrap_or_default()),
                message: format!("Expected {}, got {}", expected, unexpected),
            },
            _ => FolioError::ConfigParseError(err.to_string()),
        }
    }
}

impl From<crate::config::ConfigLoadError> for FolioError {
    fn from(err: crate::config::ConfigLoadError) -> Self {
        match err {
            crate::config::ConfigLoadError::Config(e) => e.into(),
            crate::config::ConfigLoadError::MissingRequired(key) => {
                FolioError::InvalidConfigValue {
                    key,
                    message: "Missing required value".to_string(),
                }
            }
            crate::config::ConfigLoadError::InvalidValue { key, message } => {
                FolioError::InvalidConfigValue { key, message }
            }
            crate::config::ConfigLoadError::Io(e) => e.into(),
        }
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl FolioError {
    /// Returns true if this error is related to configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FolioError::ConfigParseError(_) | FolioError::InvalidConfigValue { .. }
        )
    }

    /// Returns true if the request never produced a usable response.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            FolioError::ApiRequestFailed(_)
                | FolioError::ApiParseError(_)
                | FolioError::ApiServiceUnavailable(_)
                | FolioError::ApiTimeout(_)
        )
    }

    /// Returns true if this error is transient and the operation might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            FolioError::ApiServiceUnavailable(_) | FolioError::ApiTimeout(_) => true,
            FolioError::ServerReported { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Text shown in the chat panel for a failed exchange.
    ///
    /// Server-provided messages pass through verbatim; everything that never
    /// produced a response collapses into the connectivity fallback.
    pub fn chat_message(&self) -> String {
        match self {
            FolioError::ServerReported {
                message: Some(message),
                ..
            } => message.clone(),
            FolioError::ServerReported { message: None, .. } => {
                GENERIC_FAILURE_FALLBACK.to_string()
            }
            err if err.is_transport_error() => CONNECTIVITY_FALLBACK.to_string(),
            _ => GENERIC_FAILURE_FALLBACK.to_string(),
        }
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            FolioError::ConfigParseError(_) => "E1003",
            FolioError::InvalidConfigValue { .. } => "E1004",
            FolioError::ApiRequestFailed(_) => "E2001",
            FolioError::ApiParseError(_) => "E2002",
            FolioError::ApiServiceUnavailable(_) => "E2003",
            FolioError::ApiTimeout(_) => "E2004",
            FolioError::ServerReported { .. } => "E2005",
            FolioError::ResumeUnavailable(_) => "E3001",
            FolioError::ResumeParseError { .. } => "E3002",
            FolioError::EmptyMessage => "E4001",
            FolioError::IoError(_) => "E9003",
            FolioError::SerializationError(_) => "E9004",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            FolioError::InvalidConfigValue { .. } | FolioError::ConfigParseError(_) => {
                Some("Check folio.toml and FOLIO_* environment variables")
            }
            FolioError::ApiServiceUnavailable(_) | FolioError::ApiTimeout(_) => {
                Some("Check that the portfolio API is running and FOLIO_API_URL is correct")
            }
            FolioError::ResumeUnavailable(_) => {
                Some("Use '--source bundled' to read the resume shipped with folio")
            }
            FolioError::ResumeParseError { .. } => {
                Some("Make sure the resume file is valid JSON in the portfolio resume format")
            }
            FolioError::EmptyMessage => Some("Type a question before sending"),
            _ => None,
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        let suggestion = self.user_suggestion();

        if self.is_transient() {
            warn!(
                error_code = %code,
                suggestion = suggestion,
                "Transient error occurred: {}",
                self
            );
        } else {
            error!(
                error_code = %code,
                suggestion = suggestion,
                "Error occurred: {}",
                self
            );
        }
    }
}

// ============================================================================
// User-friendly error formatting for CLI
// ============================================================================

/// Format an error for CLI display with suggestions.
pub struct CliErrorDisplay<'a> {
    error: &'a FolioError,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a FolioError) -> Self {
        Self {
            error,
            show_suggestion: true,
        }
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl<'a> fmt::Display for CliErrorDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                writeln!(f)?;
                writeln!(f, "  Suggestion: {}", suggestion)?;
            }
        }

        if self.error.is_transient() {
            writeln!(f)?;
            writeln!(f, "  This error may be temporary. Try again shortly.")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::InvalidConfigValue {
            key: "api.base_url".to_string(),
            message: "Must be a URL".to_string(),
        };
        assert!(err.to_string().contains("E1004"));
        assert!(err.to_string().contains("api.base_url"));

        let err = FolioError::ServerReported {
            status: 429,
            message: Some("rate limited".to_string()),
        };
        assert!(err.to_string().contains("E2005"));
        assert!(err.to_string().contains("rate limited"));

        let err = FolioError::ServerReported {
            status: 500,
            message: None,
        };
        assert!(err.to_string().contains("no error message"));
    }

    #[test]
    fn test_chat_message_mapping() {
        let err = FolioError::ServerReported {
            status: 429,
            message: Some("rate limited".to_string()),
        };
        assert_eq!(err.chat_message(), "rate limited");

        let err = FolioError::ServerReported {
            status: 502,
            message: None,
        };
        assert_eq!(err.chat_message(), GENERIC_FAILURE_FALLBACK);

        let err = FolioError::ApiServiceUnavailable("connection refused".to_string());
        assert_eq!(err.chat_message(), CONNECTIVITY_FALLBACK);

        let err = FolioError::ApiParseError("expected value".to_string());
        assert_eq!(err.chat_message(), CONNECTIVITY_FALLBACK);
    }

    #[test]
    fn test_is_transient() {
        assert!(FolioError::ApiServiceUnavailable("down".to_string()).is_transient());
        assert!(FolioError::ApiTimeout("slow".to_string()).is_transient());
        assert!(FolioError::ServerReported {
            status: 503,
            message: None
        }
        .is_transient());
        assert!(FolioError::ServerReported {
            status: 429,
            message: None
        }
        .is_transient());

        assert!(!FolioError::ServerReported {
            status: 400,
            message: None
        }
        .is_transient());
        assert!(!FolioError::EmptyMessage.is_transient());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FolioError::ConfigParseError("bad toml".to_string()).error_code(),
            "E1003"
        );
        assert_eq!(
            FolioError::ApiRequestFailed("err".to_string()).error_code(),
            "E2001"
        );
        assert_eq!(
            FolioError::ResumeUnavailable("404".to_string()).error_code(),
            "E3001"
        );
        assert_eq!(FolioError::EmptyMessage.error_code(), "E4001");
        assert_eq!(FolioError::IoError("err".to_string()).error_code(), "E9003");
    }

    #[test]
    fn test_categorization() {
        assert!(FolioError::InvalidConfigValue {
            key: "api.base_url".to_string(),
            message: "empty".to_string()
        }
        .is_config_error());
        assert!(FolioError::ApiTimeout("t".to_string()).is_transport_error());
        assert!(!FolioError::ServerReported {
            status: 500,
            message: None
        }
        .is_transport_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let folio_err: FolioError = io_err.into();
        assert!(matches!(folio_err, FolioError::IoError(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_result: Result<serde_json::Value, _> = serde_json::from_str("invalid json");
        let json_err = json_result.unwrap_err();
        let folio_err: FolioError = json_err.into();
        assert!(matches!(folio_err, FolioError::SerializationError(_)));
    }

    #[test]
    fn test_cli_error_display() {
        let err = FolioError::ApiServiceUnavailable("connection refused".to_string());
        let output = CliErrorDisplay::new(&err).to_string();

        assert!(output.contains("connection refused"));
        assert!(output.contains("Suggestion"));
        assert!(output.contains("temporary"));

        let output = CliErrorDisplay::new(&err).without_suggestion().to_string();
        assert!(!output.contains("Suggestion"));
    }
}
