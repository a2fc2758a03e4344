//! Comment handlers. Any signed-in user may comment; anyone may read.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::domain::{Comment, NewComment};
use inkwell_core::ports::BaseRepository;
use inkwell_shared::dto::CreateCommentRequest;

use super::views::{populate_comment, populate_comments};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs/{blog_id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.comments.find_by_blog(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(populate_comments(state.users.as_ref(), comments).await?))
}

/// POST /api/blogs/{blog_id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();
    let draft = NewComment::new(body.into_inner().content)?;

    if state.blogs.find_by_id(blog_id).await?.is_none() {
        return Err(AppError::NotFound("Blog not found".to_string()));
    }

    let comment = state
        .comments
        .insert(Comment::new(blog_id, identity.user_id, draft))
        .await?;
    // Two separate writes; a blog deleted in between leaves the comment orphaned.
    state.blogs.attach_comment(blog_id, comment.id).await?;

    tracing::info!(comment_id = %comment.id, blog_id = %blog_id, "Comment added");

    Ok(HttpResponse::Created().json(populate_comment(state.users.as_ref(), comment).await?))
}
