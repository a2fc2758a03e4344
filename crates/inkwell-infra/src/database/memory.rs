//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Each store is a `Vec` behind an async `RwLock`, so insertion order is the
//! natural listing order. Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkwell_core::domain::{Blog, BlogQuery, Comment, Page, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, BlogRepository, CommentRepository, UserRepository};

/// Users, unique by email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }
}

/// Blogs in creation order.
#[derive(Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<Vec<Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Blog, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let blogs = self.blogs.read().await;
        Ok(blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut blogs = self.blogs.write().await;
        if blogs.iter().any(|b| b.id == blog.id) {
            return Err(RepoError::Constraint("blogs_pkey".to_string()));
        }
        blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut blogs = self.blogs.write().await;
        let slot = blogs
            .iter_mut()
            .find(|b| b.id == blog.id)
            .ok_or(RepoError::NotFound)?;
        *slot = blog.clone();
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut blogs = self.blogs.write().await;
        let before = blogs.len();
        blogs.retain(|b| b.id != id);
        if blogs.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn list(&self, query: &BlogQuery) -> Result<Page<Blog>, RepoError> {
        let blogs = self.blogs.read().await;
        let matching: Vec<&Blog> = blogs
            .iter()
            .filter(|b| query.matches(&b.title, &b.content))
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, query, total))
    }

    async fn update_details(&self, blog: &Blog) -> Result<Blog, RepoError> {
        let mut blogs = self.blogs.write().await;
        let stored = blogs
            .iter_mut()
            .find(|b| b.id == blog.id)
            .ok_or(RepoError::NotFound)?;

        stored.title = blog.title.clone();
        stored.content = blog.content.clone();
        stored.image = blog.image.clone();
        stored.category = blog.category.clone();
        stored.tags = blog.tags.clone();
        stored.updated_at = blog.updated_at;

        Ok(stored.clone())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Blog>, RepoError> {
        let blogs = self.blogs.read().await;
        Ok(blogs
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn increment_claps(&self, id: Uuid) -> Result<Option<u64>, RepoError> {
        // Read-modify-write under the write lock, so no increment is lost.
        let mut blogs = self.blogs.write().await;
        Ok(blogs.iter_mut().find(|b| b.id == id).map(|blog| {
            blog.claps += 1;
            blog.claps
        }))
    }

    async fn attach_comment(&self, blog_id: Uuid, comment_id: Uuid) -> Result<(), RepoError> {
        let mut blogs = self.blogs.write().await;
        let blog = blogs
            .iter_mut()
            .find(|b| b.id == blog_id)
            .ok_or(RepoError::NotFound)?;
        blog.comment_ids.push(comment_id);
        Ok(())
    }
}

/// Comments in creation order. Never edited or removed.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored comments.
    pub async fn len(&self) -> usize {
        self.comments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use inkwell_core::domain::{NewBlog, NewComment};

    use super::*;

    fn blog(author: Uuid, title: &str, content: &str) -> Blog {
        let draft = NewBlog::new(
            Some(title.to_string()),
            Some(content.to_string()),
            None,
            None,
            vec![],
        )
        .unwrap();
        Blog::new(author, draft)
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("A".into(), "a@example.com".into(), "h".into()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("B".into(), "a@example.com".into(), "h".into()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(User::new("A".into(), "a@example.com".into(), "h".into()))
            .await
            .unwrap();

        let found = repo.find_by_ids(&[user.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, user.id);
    }

    #[tokio::test]
    async fn test_list_pages_in_creation_order() {
        let repo = InMemoryBlogRepository::new();
        let author = Uuid::new_v4();
        for i in 0..23 {
            repo.insert(blog(author, &format!("Post {i}"), "Body"))
                .await
                .unwrap();
        }

        let first = repo.list(&BlogQuery::new(1, None)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].title, "Post 0");
        assert_eq!(first.pages, 3);

        let last = repo.list(&BlogQuery::new(3, None)).await.unwrap();
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[0].title, "Post 20");

        let past_end = repo.list(&BlogQuery::new(4, None)).await.unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.page, 4);
        assert_eq!(past_end.pages, 3);
    }

    #[tokio::test]
    async fn test_list_searches_title_or_content() {
        let repo = InMemoryBlogRepository::new();
        let author = Uuid::new_v4();
        repo.insert(blog(author, "The Art of Minimalism", "Less."))
            .await
            .unwrap();
        repo.insert(blog(author, "Typography", "Classic serifs"))
            .await
            .unwrap();

        for keyword in ["art", "ART", "minim"] {
            let page = repo
                .list(&BlogQuery::new(1, Some(keyword.into())))
                .await
                .unwrap();
            assert_eq!(page.items.len(), 1, "keyword {keyword}");
            assert_eq!(page.items[0].title, "The Art of Minimalism");
            assert_eq!(page.pages, 1);
        }

        let by_content = repo
            .list(&BlogQuery::new(1, Some("SERIF".into())))
            .await
            .unwrap();
        assert_eq!(by_content.items[0].title, "Typography");

        let none = repo
            .list(&BlogQuery::new(1, Some("architecture".into())))
            .await
            .unwrap();
        assert!(none.items.is_empty());
        assert_eq!(none.pages, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claps_are_not_lost() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let id = repo.insert(blog(Uuid::new_v4(), "T", "C")).await.unwrap().id;

        let handles = (0..100).map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.increment_claps(id).await })
        });
        for result in futures::future::join_all(handles).await {
            assert!(result.unwrap().unwrap().is_some());
        }

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.claps, 100);
    }

    #[tokio::test]
    async fn test_update_details_keeps_concurrent_claps() {
        let repo = InMemoryBlogRepository::new();
        let created = repo.insert(blog(Uuid::new_v4(), "T", "C")).await.unwrap();

        // An editor loaded the blog before someone clapped.
        let mut edited = created.clone();
        repo.increment_claps(created.id).await.unwrap();
        edited.title = "Edited".to_string();

        let stored = repo.update_details(&edited).await.unwrap();
        assert_eq!(stored.title, "Edited");
        assert_eq!(stored.claps, 1);
    }

    #[tokio::test]
    async fn test_clap_unknown_blog_is_none() {
        let repo = InMemoryBlogRepository::new();
        assert_eq!(repo.increment_claps(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_attach_comment_keeps_order() {
        let blogs = InMemoryBlogRepository::new();
        let comments = InMemoryCommentRepository::new();
        let created = blogs.insert(blog(Uuid::new_v4(), "T", "C")).await.unwrap();

        let mut ids = Vec::new();
        for text in ["first", "second"] {
            let comment = Comment::new(
                created.id,
                Uuid::new_v4(),
                NewComment::new(Some(text.into())).unwrap(),
            );
            let comment = comments.insert(comment).await.unwrap();
            blogs.attach_comment(created.id, comment.id).await.unwrap();
            ids.push(comment.id);
        }

        let stored = blogs.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.comment_ids, ids);

        let listed = comments.find_by_blog(created.id).await.unwrap();
        assert_eq!(listed[0].content, "first");
        assert_eq!(listed[1].content, "second");
    }

    #[tokio::test]
    async fn test_delete_leaves_comments_behind() {
        let blogs = InMemoryBlogRepository::new();
        let comments = InMemoryCommentRepository::new();
        let created = blogs.insert(blog(Uuid::new_v4(), "T", "C")).await.unwrap();
        comments
            .insert(Comment::new(
                created.id,
                Uuid::new_v4(),
                NewComment::new(Some("hi".into())).unwrap(),
            ))
            .await
            .unwrap();

        blogs.delete(created.id).await.unwrap();

        assert!(blogs.find_by_id(created.id).await.unwrap().is_none());
        assert_eq!(comments.find_by_blog(created.id).await.unwrap().len(), 1);
        assert!(matches!(
            blogs.delete(created.id).await,
            Err(RepoError::NotFound)
        ));
    }
}
