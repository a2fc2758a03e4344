//! Public user profiles.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::ports::BaseRepository;

use super::views::{populate_blogs, user_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_user(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// GET /api/users/{id}/blogs
pub async fn get_user_blogs(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let blogs = state.blogs.find_by_author(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(populate_blogs(state.users.as_ref(), blogs).await?))
}
