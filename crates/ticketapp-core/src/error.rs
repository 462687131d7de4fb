//! Error types for the Ticketapp domain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::FieldErrors;

/// A shared error type for the entire Ticketapp workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Validation failures and
/// authorization denials are ordinary returned values here, not faults:
/// callers are expected to match on them and re-prompt or redirect.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TicketError {
    /// The current execution context holds no session marker.
    #[error("Unauthorized: no active session")]
    Unauthorized,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// One or more editable fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Storage error (key-value slot read/write)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TicketError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the field errors if this is a Validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TicketError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TicketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<FieldErrors> for TicketError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A type alias for `Result<T, TicketError>`.
pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(TicketError::Unauthorized.is_unauthorized());
        assert!(TicketError::not_found("ticket", "42").is_not_found());
        assert!(!TicketError::internal("boom").is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TicketError = io.into();
        assert!(matches!(err, TicketError::Storage { .. }));
    }

    #[test]
    fn test_not_found_message() {
        let err = TicketError::not_found("ticket", "1700000000000-ab12");
        assert_eq!(
            err.to_string(),
            "Entity not found: ticket '1700000000000-ab12'"
        );
    }
}
