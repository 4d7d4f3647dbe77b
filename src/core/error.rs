//! Typed errors for the dashboard actions
//!
//! Form validation failures are deliberately NOT represented here: they are a
//! normal return value ([`ActionState`](crate::core::state::ActionState)).
//! This module covers the failures that leave the happy path:
//!
//! - [`PersistError`]: the store rejected or could not run a statement
//! - [`ConfigError`]: startup configuration is missing or malformed
//! - [`ActionError`]: what an action surfaces to the HTTP layer
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! match actions.delete_invoice("inv-1").await {
//!     Ok(()) => {}
//!     Err(ActionError::Persist(PersistError::Backend { operation, .. })) => {
//!         tracing::warn!(%operation, "delete failed");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Persistence Errors
// =============================================================================

/// Errors raised by an [`InvoiceStore`](crate::core::service::InvoiceStore)
#[derive(Debug, Error)]
pub enum PersistError {
    /// The backend rejected the statement
    #[error("Failed to {operation} invoice: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// The backend could not be reached (pool closed, connection refused, ...)
    #[error("Invoice store unavailable: {0}")]
    Unavailable(String),

    /// Internal lock of an in-process store was poisoned
    #[error("Invoice store lock poisoned: {0}")]
    Poisoned(String),
}

impl PersistError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        PersistError::Backend {
            operation,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PersistError::Backend { .. } => "PERSIST_FAILED",
            PersistError::Unavailable(_) => "STORE_UNAVAILABLE",
            PersistError::Poisoned(_) => "STORE_POISONED",
        }
    }
}

#[cfg(feature = "postgres")]
impl PersistError {
    /// Map a sqlx error raised while running `operation`
    pub fn from_sqlx(operation: &'static str, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                PersistError::Unavailable(err.to_string())
            }
            other => PersistError::backend(operation, other.to_string()),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing required environment variable '{0}'")]
    MissingEnv(&'static str),

    /// Failed to parse a configuration document
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Action Errors
// =============================================================================

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Failure surfaced by an action to its caller's error boundary
#[derive(Debug, Error)]
pub enum ActionError {
    /// Store failure that the action does not swallow (delete)
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Unrecognized failure re-raised from the identity provider
    #[error("Authentication failed unexpectedly: {0}")]
    Fatal(#[source] anyhow::Error),
}

impl ActionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Persist(PersistError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ActionError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::Fatal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Persist(e) => e.error_code(),
            ActionError::Fatal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.error_code(), error = %self, "action failed");
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
