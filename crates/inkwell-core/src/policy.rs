//! Ownership-based access control for blog mutations.

use uuid::Uuid;

use crate::domain::Blog;
use crate::error::DomainError;

/// Decide whether `caller` may update or delete the blog stored under `blog_id`.
///
/// Checks run in a fixed order: a missing blog is reported before a missing
/// credential, and a missing credential before a foreign one.
pub fn authorize_author_mutation(
    blog: Option<Blog>,
    blog_id: Uuid,
    caller: Option<Uuid>,
) -> Result<Blog, DomainError> {
    let blog = blog.ok_or_else(|| DomainError::not_found("Blog", blog_id))?;
    let caller = caller.ok_or(DomainError::Unauthorized)?;

    if !blog.is_authored_by(caller) {
        return Err(DomainError::Forbidden);
    }

    Ok(blog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBlog;

    fn blog_by(author: Uuid) -> Blog {
        let draft = NewBlog::new(Some("T".into()), Some("C".into()), None, None, vec![]).unwrap();
        Blog::new(author, draft)
    }

    #[test]
    fn test_author_may_mutate() {
        let author = Uuid::new_v4();
        let blog = blog_by(author);
        let id = blog.id;

        let allowed = authorize_author_mutation(Some(blog), id, Some(author)).unwrap();
        assert_eq!(allowed.id, id);
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let blog = blog_by(Uuid::new_v4());
        let id = blog.id;

        let result = authorize_author_mutation(Some(blog), id, Some(Uuid::new_v4()));
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }

    #[test]
    fn test_anonymous_caller_is_unauthorized() {
        let blog = blog_by(Uuid::new_v4());
        let id = blog.id;

        let result = authorize_author_mutation(Some(blog), id, None);
        assert!(matches!(result, Err(DomainError::Unauthorized)));
    }

    #[test]
    fn test_missing_blog_wins_over_missing_credential() {
        let id = Uuid::new_v4();

        let result = authorize_author_mutation(None, id, None);
        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity_type: "Blog", id: missing }) if missing == id
        ));
    }
}
