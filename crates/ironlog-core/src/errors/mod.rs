// ABOUTME: Unified error handling for the ironlog sync layer
// ABOUTME: Defines ErrorCode, AppError and the AppResult alias shared by every store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every store operation either succeeds or produces an [`AppError`] carrying an
//! [`ErrorCode`]. Client-side stores record these errors as state; callers decide
//! whether to render, retry or ignore them. Nothing here is fatal.

/// Document store backend errors
pub mod store;

pub use store::{StoreError, StoreResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// No signed-in user when a store call executes
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,

    // Validation (3000-3999)
    /// Generic invalid user input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field was left empty
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A numeric field is outside its allowed range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// The addressed document does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Remote store (5000-5999)
    /// Reading from the document store failed
    #[serde(rename = "REMOTE_READ_FAILED")]
    RemoteReadFailed = 5000,
    /// Writing to the document store failed
    #[serde(rename = "REMOTE_WRITE_FAILED")]
    RemoteWriteFailed = 5001,
    /// A third-party sink (feedback relay) failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5002,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// A document could not be (de)serialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::RemoteReadFailed => "Reading from the remote store failed",
            Self::RemoteWriteFailed => "Writing to the remote store failed",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code belongs to the validation family
    ///
    /// Validation errors are raised before dispatch and never reach the store.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message, backend messages are kept verbatim
    pub message: String,
    /// Identifier of the document or entity involved, if any
    pub resource_id: Option<String>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            resource_id: None,
            source: None,
        }
    }

    /// Attach the identifier of the affected resource
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// No signed-in user
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "No user authenticated")
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{field} is required."),
        )
    }

    /// Numeric value out of range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Remote read failure, message surfaced verbatim
    #[must_use]
    pub fn remote_read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteReadFailed, message)
    }

    /// Remote write failure, message surfaced verbatim
    #[must_use]
    pub fn remote_write(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteWriteFailed, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        let code = match &error {
            StoreError::NotFound { .. } => ErrorCode::ResourceNotFound,
            StoreError::ReadFailed { .. } => ErrorCode::RemoteReadFailed,
            StoreError::WriteFailed { .. } | StoreError::InvalidPath { .. } => {
                ErrorCode::RemoteWriteFailed
            }
            StoreError::Serialization(_) => ErrorCode::SerializationError,
        };
        let resource = match &error {
            StoreError::NotFound { path } | StoreError::InvalidPath { path } => Some(path.clone()),
            _ => None,
        };
        let mut app = Self::new(code, error.to_string());
        app.resource_id = resource;
        app.with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_family() {
        assert!(ErrorCode::InvalidInput.is_validation());
        assert!(ErrorCode::ValueOutOfRange.is_validation());
        assert!(!ErrorCode::RemoteWriteFailed.is_validation());
        assert!(!ErrorCode::AuthRequired.is_validation());
    }

    #[test]
    fn test_store_error_keeps_backend_message() {
        let error: AppError = StoreError::WriteFailed {
            context: "disk I/O error".to_owned(),
        }
        .into();

        assert_eq!(error.code, ErrorCode::RemoteWriteFailed);
        assert!(error.message.contains("disk I/O error"));
    }

    #[test]
    fn test_not_found_carries_path() {
        let error: AppError = StoreError::NotFound {
            path: "users/u1/exercises/e1".to_owned(),
        }
        .into();

        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.resource_id.as_deref(), Some("users/u1/exercises/e1"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::AuthRequired).unwrap();
        assert_eq!(json, "\"AUTH_REQUIRED\"");
    }
}
