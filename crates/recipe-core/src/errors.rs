// ABOUTME: Unified error types for the recipe server with codes and HTTP status mapping
// ABOUTME: Every store and core failure surfaces as an AppError carrying one ErrorCode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Defines the error codes the recipe core reports and the `AppError` type
//! that carries them. Store backends, the core components, and the HTTP
//! handlers all speak `AppResult<T>`, so a failure raised deep inside a
//! store primitive reaches the handler with its kind intact.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed input reached the core boundary
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// No document exists at the requested key
    ResourceNotFound = 4000,
    /// Insert targeted a key that already exists
    ResourceAlreadyExists = 4001,
    /// Another writer holds the lease, or the presented lease is no longer valid
    ResourceLocked = 4002,
    /// The store connection or query execution failed
    ResourceUnavailable = 4003,

    // Configuration (6000-6999)
    /// Configuration error encountered
    ConfigError = 6000,
    /// Configuration value could not be parsed
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// A stored document could not be encoded or decoded
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    ///
    /// Only a missing resource and malformed input are distinguished; every
    /// other kind is a generic server error at the HTTP boundary.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::ResourceNotFound => 404,
            Self::ResourceAlreadyExists
            | Self::ResourceLocked
            | Self::ResourceUnavailable
            | Self::ConfigError
            | Self::ConfigInvalid
            | Self::InternalError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ResourceLocked => "The resource is currently locked and cannot be modified",
            Self::ResourceUnavailable => "The backing store is unavailable",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// True when the error reports a held or invalidated lease
    ///
    /// Callers that want retry-on-contention use this to decide; the core
    /// itself never retries.
    #[must_use]
    pub fn is_lock_contention(&self) -> bool {
        self.code == ErrorCode::ResourceLocked
    }

    /// True when the error reports a missing document
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::ResourceNotFound
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Lease held by another writer, or a stale lock token was presented
    #[must_use]
    pub fn lock_contention(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceLocked, message)
    }

    /// Insert targeted an existing key
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Store connection or query failure
    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceUnavailable, message)
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Document encode/decode failure
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Configuration value failed to parse
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// HTTP error response body
///
/// Matches the `{"error": "<message>"}` shape clients of the recipe API expect.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.message.clone(),
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceLocked.http_status(), 500);
        assert_eq!(ErrorCode::ResourceAlreadyExists.http_status(), 500);
        assert_eq!(ErrorCode::ResourceUnavailable.http_status(), 500);
    }

    #[test]
    fn test_not_found_message() {
        let error = AppError::not_found("Recipe");
        assert_eq!(error.message, "Recipe not found");
        assert!(error.is_not_found());
        assert!(!error.is_lock_contention());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::not_found("Recipe");
        let json = serde_json::to_string(&ErrorResponse::from(&error)).unwrap();
        assert_eq!(json, r#"{"error":"Recipe not found"}"#);
    }

    #[test]
    fn test_serde_error_conversion_keeps_source() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::SerializationError);
        assert!(app.source.is_some());
    }
}
