use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogQuery, Comment, Page, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Load every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, Uuid> {
    /// One page of blogs in creation order, filtered by the query keyword.
    async fn list(&self, query: &BlogQuery) -> Result<Page<Blog>, RepoError>;

    /// Persist the editable fields of `blog` (title, content, image,
    /// category, tags, updated_at) and return the stored row. Claps and
    /// comment refs are left to their own atomic operations.
    async fn update_details(&self, blog: &Blog) -> Result<Blog, RepoError>;

    /// Every blog written by `author_id`, in creation order.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError>;

    /// Atomically add one clap and return the new count, or `None` if the
    /// blog does not exist.
    async fn increment_claps(&self, id: Uuid) -> Result<Option<u64>, RepoError>;

    /// Append a comment reference to the blog.
    async fn attach_comment(&self, blog_id: Uuid, comment_id: Uuid) -> Result<(), RepoError>;
}

/// Comment repository. Comments are never edited or removed.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments on a blog in creation order.
    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
