//! Error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// `{ "message": "..." }` - the single error shape clients handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("Not authorized")
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(format!("{entity} not found"))
    }

    pub fn internal_error() -> Self {
        Self::new("Server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_to_message_object() {
        let body = serde_json::to_value(ErrorResponse::not_found("Blog")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Blog not found" }));
    }
}
