// ABOUTME: Structured error types for document store operations
// ABOUTME: Backend errors keep their message verbatim for display to the user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update-only write or required read hit a missing document
    #[error("No document to update: {path}")]
    NotFound {
        /// Full document path
        path: String,
    },

    /// The backend failed while reading
    #[error("{context}")]
    ReadFailed {
        /// Backend message
        context: String,
    },

    /// The backend failed while writing
    #[error("{context}")]
    WriteFailed {
        /// Backend message
        context: String,
    },

    /// A path has an empty segment or the wrong segment parity
    #[error("Invalid document path: {path}")]
    InvalidPath {
        /// Offending path
        path: String,
    },

    /// Stored data is not valid JSON for the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Wrap a backend read error
    pub fn read(error: impl std::fmt::Display) -> Self {
        Self::ReadFailed {
            context: error.to_string(),
        }
    }

    /// Wrap a backend write error
    pub fn write(error: impl std::fmt::Display) -> Self {
        Self::WriteFailed {
            context: error.to_string(),
        }
    }
}

/// Result alias for document store operations
pub type StoreResult<T> = Result<T, StoreError>;
