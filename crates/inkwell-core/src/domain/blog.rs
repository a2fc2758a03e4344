use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Blog entity - a post written by a single, immutable author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Comments attached to this blog, in the order they were added.
    pub comment_ids: Vec<Uuid>,
    pub claps: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog owned by `author_id`.
    pub fn new(author_id: Uuid, draft: NewBlog) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            content: draft.content,
            image: draft.image,
            category: draft.category,
            tags: draft.tags,
            comment_ids: Vec::new(),
            claps: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Apply an edit. Author, claps and comment refs are out of reach here.
    pub fn apply(&mut self, changes: BlogChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image) = changes.image {
            self.image = non_blank(image);
        }
        if let Some(category) = changes.category {
            self.category = non_blank(category);
        }
        if let Some(tags) = changes.tags {
            self.tags = normalize_tags(tags);
        }
        self.updated_at = Utc::now();
    }
}

/// Validated input for creating a blog.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl NewBlog {
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        image: Option<String>,
        category: Option<String>,
        tags: Vec<String>,
    ) -> Result<Self, DomainError> {
        let title = title.and_then(non_blank);
        let content = content.filter(|c| !c.trim().is_empty());

        let (Some(title), Some(content)) = (title, content) else {
            return Err(DomainError::validation("Please add a title and content"));
        };

        Ok(Self {
            title,
            content,
            image: image.and_then(non_blank),
            category: category.and_then(non_blank),
            tags: normalize_tags(tags),
        })
    }
}

/// A partial edit of a blog. `None` leaves a field untouched; an empty
/// image or category clears it.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl BlogChanges {
    /// Title and content may be omitted but never blanked.
    pub fn validate(self) -> Result<Self, DomainError> {
        let blank = |v: &Option<String>| v.as_ref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.title) || blank(&self.content) {
            return Err(DomainError::validation("Title and content cannot be empty"));
        }

        Ok(Self {
            title: self.title.map(|t| t.trim().to_string()),
            ..self
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim every tag and drop empty ones, keeping the given order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().filter_map(non_blank).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> NewBlog {
        NewBlog::new(
            Some(title.to_string()),
            Some(content.to_string()),
            None,
            None,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_new_blog_requires_title_and_content() {
        assert!(NewBlog::new(None, Some("C".into()), None, None, vec![]).is_err());
        assert!(NewBlog::new(Some("T".into()), None, None, None, vec![]).is_err());
        assert!(NewBlog::new(Some("  ".into()), Some("C".into()), None, None, vec![]).is_err());
        assert!(NewBlog::new(Some("T".into()), Some("\n".into()), None, None, vec![]).is_err());
    }

    #[test]
    fn test_new_blog_normalizes_optional_fields() {
        let draft = NewBlog::new(
            Some(" The Art of Minimalism ".into()),
            Some("Less is more.".into()),
            Some("".into()),
            Some(" Lifestyle ".into()),
            vec![" minimalism ".into(), "".into(), "focus".into()],
        )
        .unwrap();

        assert_eq!(draft.title, "The Art of Minimalism");
        assert_eq!(draft.image, None);
        assert_eq!(draft.category.as_deref(), Some("Lifestyle"));
        assert_eq!(draft.tags, vec!["minimalism", "focus"]);
    }

    #[test]
    fn test_new_blog_starts_without_claps_or_comments() {
        let author = Uuid::new_v4();
        let blog = Blog::new(author, draft("T", "C"));

        assert_eq!(blog.claps, 0);
        assert!(blog.comment_ids.is_empty());
        assert!(blog.is_authored_by(author));
        assert!(!blog.is_authored_by(Uuid::new_v4()));
    }

    #[test]
    fn test_apply_changes_only_touches_given_fields() {
        let author = Uuid::new_v4();
        let mut blog = Blog::new(author, draft("T", "C"));
        let created = blog.created_at;

        blog.apply(BlogChanges {
            title: Some("New title".into()),
            tags: Some(vec!["a".into(), " b ".into()]),
            ..Default::default()
        });

        assert_eq!(blog.title, "New title");
        assert_eq!(blog.content, "C");
        assert_eq!(blog.tags, vec!["a", "b"]);
        assert_eq!(blog.author_id, author);
        assert_eq!(blog.created_at, created);
        assert!(blog.updated_at >= created);
    }

    #[test]
    fn test_apply_empty_image_clears_it() {
        let mut blog = Blog::new(
            Uuid::new_v4(),
            NewBlog::new(
                Some("T".into()),
                Some("C".into()),
                Some("https://img".into()),
                None,
                vec![],
            )
            .unwrap(),
        );

        blog.apply(BlogChanges {
            image: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(blog.image, None);
    }

    #[test]
    fn test_changes_reject_blank_title() {
        let changes = BlogChanges {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(changes.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_changes_allow_omitted_title() {
        let changes = BlogChanges {
            category: Some("Design".into()),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());
    }
}
