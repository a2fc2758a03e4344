use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Comment entity - immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(blog_id: Uuid, author_id: Uuid, draft: NewComment) -> Self {
        Self {
            id: Uuid::new_v4(),
            blog_id,
            author_id,
            content: draft.content,
            created_at: Utc::now(),
        }
    }
}

/// Validated comment body.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
}

impl NewComment {
    pub fn new(content: Option<String>) -> Result<Self, DomainError> {
        match content {
            Some(content) if !content.trim().is_empty() => Ok(Self { content }),
            _ => Err(DomainError::validation("Please add comment content")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_requires_content() {
        assert!(NewComment::new(None).is_err());
        assert!(NewComment::new(Some("  ".into())).is_err());
        assert_eq!(
            NewComment::new(Some("Nice post".into())).unwrap().content,
            "Nice post"
        );
    }
}
