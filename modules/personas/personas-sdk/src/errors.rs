//! Public error types for the `personas` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the `PersonasApi`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonasError {
    /// Persona with the specified ID was not found.
    #[error("Persona not found: {id}")]
    NotFound { id: i64 },

    /// A persona with the specified DNI already exists.
    #[error("Persona with dni '{dni}' already exists")]
    Conflict { dni: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl PersonasError {
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(dni: impl Into<String>) -> Self {
        Self::Conflict { dni: dni.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
