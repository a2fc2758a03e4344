//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    /// No (valid) credential was presented.
    #[error("Not authorized")]
    Unauthorized,

    /// A credential was presented but does not own the resource.
    #[error("User not authorized")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        let err = DomainError::not_found("Blog", Uuid::new_v4());
        assert_eq!(err.to_string(), "Blog not found");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = DomainError::validation("Please add a title and content");
        assert_eq!(err.to_string(), "Please add a title and content");
    }
}
