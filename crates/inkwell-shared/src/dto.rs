//! Data Transfer Objects - request/response types for the API.
//!
//! Response keys are camelCase to match the documents the original client
//! renders (`createdAt`, `updatedAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Request to register a new user.
///
/// Fields are optional at the wire level so a missing field surfaces as a
/// validation message instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Issued credential plus the identity it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user's public profile. There is deliberately no password field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author reference replaced by a summary of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

/// Tags as sent by clients: either a JSON array or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => tags,
            TagsInput::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
}

/// Partial update. Unknown keys (author, claps, comments) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
}

/// Query string of `GET /api/blogs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlogsQuery {
    #[serde(alias = "keyword")]
    pub search: Option<String>,
    /// Kept as text: anything that is not a positive integer means page 1.
    pub page_number: Option<String>,
}

impl ListBlogsQuery {
    pub fn page(&self) -> u64 {
        self.page_number
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: AuthorSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub comments: Vec<Uuid>,
    pub claps: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListResponse {
    pub blogs: Vec<BlogResponse>,
    pub page: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClapResponse {
    pub claps: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: Uuid,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub author: AuthorSummary,
    pub blog: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_accept_array_or_csv() {
        let list: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"T","content":"C","tags":["a","b"]}"#).unwrap();
        assert_eq!(list.tags.unwrap().into_vec(), vec!["a", "b"]);

        let csv: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"T","content":"C","tags":"a, b"}"#).unwrap();
        assert_eq!(csv.tags.unwrap().into_vec(), vec!["a", " b"]);
    }

    #[test]
    fn test_page_number_is_lenient() {
        let page = |raw: Option<&str>| ListBlogsQuery {
            search: None,
            page_number: raw.map(str::to_string),
        }
        .page();

        assert_eq!(page(None), 1);
        assert_eq!(page(Some("3")), 3);
        assert_eq!(page(Some("0")), 1);
        assert_eq!(page(Some("-2")), 1);
        assert_eq!(page(Some("abc")), 1);
    }

    #[test]
    fn test_list_query_accepts_keyword_alias() {
        let query: ListBlogsQuery =
            serde_json::from_str(r#"{"keyword":"art","pageNumber":"2"}"#).unwrap();
        assert_eq!(query.search.as_deref(), Some("art"));
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn test_user_response_has_no_password() {
        let user = UserResponse {
            id: Uuid::new_v4(),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
