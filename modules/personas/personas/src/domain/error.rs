use std::fmt;

use personas_sdk::PersonasError;
use thiserror::Error;

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Persona not found: {id}")]
    NotFound { id: i64 },

    #[error("Persona with dni '{dni}' already exists")]
    DniAlreadyExists { dni: String },

    #[error("Validation failed: {}", join_violations(.errors))]
    Validation { errors: Vec<FieldViolation> },

    #[error("Database error: {message}")]
    Database { message: String },
}

fn join_violations(errors: &[FieldViolation]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn dni_already_exists(dni: impl Into<String>) -> Self {
        Self::DniAlreadyExists { dni: dni.into() }
    }

    #[must_use]
    pub fn validation(errors: Vec<FieldViolation>) -> Self {
        Self::Validation { errors }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for PersonasError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { id } => Self::not_found(id),
            DomainError::DniAlreadyExists { dni } => Self::conflict(dni),
            DomainError::Validation { errors } => Self::validation(join_violations(&errors)),
            DomainError::Database { .. } => Self::internal(),
        }
    }
}
