//! Domain → wire conversions, including author population.

use std::collections::HashMap;

use uuid::Uuid;

use inkwell_core::domain::{Blog, Comment, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, UserRepository};
use inkwell_shared::dto::{AuthorSummary, BlogResponse, CommentResponse, UserResponse};

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Which author fields a listing exposes.
#[derive(Debug, Clone, Copy)]
pub enum AuthorFields {
    NameAndEmail,
    NameOnly,
}

fn summarize(id: Uuid, user: Option<&User>, fields: AuthorFields) -> AuthorSummary {
    match user {
        Some(user) => AuthorSummary {
            id: user.id,
            name: user.name.clone(),
            email: match fields {
                AuthorFields::NameAndEmail => Some(user.email.clone()),
                AuthorFields::NameOnly => None,
            },
        },
        // Dangling reference: keep the id so clients can still link it.
        None => AuthorSummary {
            id,
            name: String::new(),
            email: None,
        },
    }
}

fn blog_response(blog: Blog, author: AuthorSummary) -> BlogResponse {
    BlogResponse {
        id: blog.id,
        title: blog.title,
        content: blog.content,
        author,
        image: blog.image,
        category: blog.category,
        tags: blog.tags,
        comments: blog.comment_ids,
        claps: blog.claps,
        created_at: blog.created_at,
        updated_at: blog.updated_at,
    }
}

fn comment_response(comment: Comment, author: AuthorSummary) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        content: comment.content,
        author,
        blog: comment.blog_id,
        created_at: comment.created_at,
    }
}

/// Load the distinct authors referenced by `ids` in one query.
async fn load_authors(
    users: &dyn UserRepository,
    ids: impl Iterator<Item = Uuid>,
) -> Result<HashMap<Uuid, User>, RepoError> {
    let mut wanted: Vec<Uuid> = ids.collect();
    wanted.sort_unstable();
    wanted.dedup();

    Ok(users
        .find_by_ids(&wanted)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect())
}

pub async fn populate_blogs(
    users: &dyn UserRepository,
    blogs: Vec<Blog>,
) -> Result<Vec<BlogResponse>, RepoError> {
    let authors = load_authors(users, blogs.iter().map(|b| b.author_id)).await?;

    Ok(blogs
        .into_iter()
        .map(|blog| {
            let author = summarize(
                blog.author_id,
                authors.get(&blog.author_id),
                AuthorFields::NameAndEmail,
            );
            blog_response(blog, author)
        })
        .collect())
}

pub async fn populate_blog(
    users: &dyn UserRepository,
    blog: Blog,
) -> Result<BlogResponse, RepoError> {
    let author = users.find_by_id(blog.author_id).await?;
    let summary = summarize(blog.author_id, author.as_ref(), AuthorFields::NameAndEmail);
    Ok(blog_response(blog, summary))
}

pub async fn populate_comments(
    users: &dyn UserRepository,
    comments: Vec<Comment>,
) -> Result<Vec<CommentResponse>, RepoError> {
    let authors = load_authors(users, comments.iter().map(|c| c.author_id)).await?;

    Ok(comments
        .into_iter()
        .map(|comment| {
            let author = summarize(
                comment.author_id,
                authors.get(&comment.author_id),
                AuthorFields::NameOnly,
            );
            comment_response(comment, author)
        })
        .collect())
}

pub async fn populate_comment(
    users: &dyn UserRepository,
    comment: Comment,
) -> Result<CommentResponse, RepoError> {
    let author = users.find_by_id(comment.author_id).await?;
    let summary = summarize(comment.author_id, author.as_ref(), AuthorFields::NameOnly);
    Ok(comment_response(comment, summary))
}
