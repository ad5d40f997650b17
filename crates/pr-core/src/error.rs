//! # AppError
//!
//! Centralized error handling for the Power Routine workspace.
//! The social engine itself signals most refusals with `false`; this type
//! carries the cases that need a reason (article validation, id parsing)
//! and is what the HTTP layer maps onto status codes.

use thiserror::Error;

/// The primary error type for all pr-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (e.g., Photo, Group, Feed item)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., blank article title, oversized upload)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Resource already exists (e.g., duplicate group name)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., template rendering)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        AppError::NotFound(kind.to_string(), id.to_string())
    }
}

/// A specialized Result type for Power Routine logic.
pub type Result<T> = std::result::Result<T, AppError>;
