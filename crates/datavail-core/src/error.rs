//! Structured error types for the library facade.
//!
//! These errors serialize to JSON so callers embedding the engine behind a
//! service boundary can forward them unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

use datavail_reference::ReferenceError;

/// Error codes for datavail operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input is not valid JSON.
    InvalidJson,
    /// Input is JSON but not an availability report.
    InvalidReport,
    /// Reference metadata could not be loaded.
    ReferenceError,
    /// I/O error during operation.
    IoError,
    /// Internal error (unexpected state).
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidJson => write!(f, "invalid_json"),
            ErrorCode::InvalidReport => write!(f, "invalid_report"),
            ErrorCode::ReferenceError => write!(f, "reference_error"),
            ErrorCode::IoError => write!(f, "io_error"),
            ErrorCode::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error returned by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatavailError {
    /// Error code for programmatic handling.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DatavailError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn invalid_json(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidJson, format!("Invalid JSON: {}", err))
    }

    /// A report missing one of its required collections.
    pub fn missing_collection(key: &str) -> Self {
        Self::with_details(
            ErrorCode::InvalidReport,
            "Invalid report",
            format!("`{}` must be an array", key),
        )
    }

    pub fn invalid_report(err: impl fmt::Display) -> Self {
        Self::with_details(ErrorCode::InvalidReport, "Invalid report", err.to_string())
    }

    pub fn io_error(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::IoError, format!("I/O error: {}", err))
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, format!("Internal error: {}", err))
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"code":"{}","message":"{}"}}"#,
                self.code, self.message
            )
        })
    }
}

impl fmt::Display for DatavailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "[{}] {}: {}", self.code, self.message, details)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for DatavailError {}

impl From<serde_json::Error> for DatavailError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_json(err)
    }
}

impl From<std::io::Error> for DatavailError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err)
    }
}

impl From<ReferenceError> for DatavailError {
    fn from(err: ReferenceError) -> Self {
        let code = match &err {
            ReferenceError::Io { .. } => ErrorCode::IoError,
            _ => ErrorCode::ReferenceError,
        };
        Self::new(code, format!("Reference metadata: {}", err))
    }
}
