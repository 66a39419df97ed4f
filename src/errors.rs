//! Error types for domain operations

use thiserror::Error;

/// Broad category of a failure, used by callers to choose an outcome
/// (for example a response code) without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input to a constructor or value object
    Validation,
    /// Operation attempted from a state that forbids it
    InvalidState,
    /// Operation would violate a uniqueness or cross-entity rule
    Conflict,
    /// Referenced identifier does not resolve to an existing entity
    NotFound,
    /// Persistence collaborator failed
    Storage,
}

/// Errors raised by entities, value objects and aggregates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid input; retrying with the same data cannot succeed
    #[error("Validation failed for {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Operation not allowed from the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Uniqueness or cross-entity rule violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        DomainError::InvalidState(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::InvalidState(_) => ErrorKind::InvalidState,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}
