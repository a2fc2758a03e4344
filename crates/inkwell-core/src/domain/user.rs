use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// User entity - represents a registered author or reader.
///
/// The password hash is never serialized, so a `User` can be handed to any
/// outward-facing encoder without leaking credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Please add all fields"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("Invalid email address"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    }
}

/// Emails are stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "$argon2id$secret".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_registration_normalizes_email() {
        let reg = Registration::new(" Jane ", "  Jane@Example.COM ", "password123").unwrap();
        assert_eq!(reg.name, "Jane");
        assert_eq!(reg.email, "jane@example.com");
    }

    #[test]
    fn test_registration_requires_all_fields() {
        let err = Registration::new("", "jane@example.com", "password123").unwrap_err();
        assert_eq!(err.to_string(), "Please add all fields");

        let err = Registration::new("Jane", "jane@example.com", "").unwrap_err();
        assert_eq!(err.to_string(), "Please add all fields");
    }

    #[test]
    fn test_registration_rejects_short_password() {
        let result = Registration::new("Jane", "jane@example.com", "short");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_registration_rejects_email_without_at() {
        let result = Registration::new("Jane", "jane.example.com", "password123");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
