//! Blog handlers: listing, CRUD and claps.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::domain::{Blog, BlogChanges, BlogQuery, NewBlog};
use inkwell_core::policy::authorize_author_mutation;
use inkwell_core::ports::BaseRepository;
use inkwell_shared::dto::{
    BlogListResponse, ClapResponse, CreateBlogRequest, DeletedResponse, ListBlogsQuery,
    UpdateBlogRequest,
};

use super::views::{populate_blog, populate_blogs};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn blog_not_found() -> AppError {
    AppError::NotFound("Blog not found".to_string())
}

/// GET /api/blogs?search=&pageNumber=
pub async fn list_blogs(
    state: web::Data<AppState>,
    query: web::Query<ListBlogsQuery>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let query = BlogQuery::new(params.page(), params.search);

    let page = state.blogs.list(&query).await?;
    tracing::debug!(
        page = page.page,
        pages = page.pages,
        total = page.total,
        "Listed blogs"
    );

    Ok(HttpResponse::Ok().json(BlogListResponse {
        blogs: populate_blogs(state.users.as_ref(), page.items).await?,
        page: page.page,
        pages: page.pages,
    }))
}

/// GET /api/blogs/{id}
pub async fn get_blog(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let blog = state
        .blogs
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(blog_not_found)?;

    Ok(HttpResponse::Ok().json(populate_blog(state.users.as_ref(), blog).await?))
}

/// POST /api/blogs
pub async fn create_blog(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = NewBlog::new(
        req.title,
        req.content,
        req.image,
        req.category,
        req.tags.map(|t| t.into_vec()).unwrap_or_default(),
    )?;

    let blog = state.blogs.insert(Blog::new(identity.user_id, draft)).await?;
    tracing::info!(blog_id = %blog.id, author_id = %blog.author_id, "Blog created");

    Ok(HttpResponse::Created().json(populate_blog(state.users.as_ref(), blog).await?))
}

/// PUT /api/blogs/{id} - author only
pub async fn update_blog(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let existing = state.blogs.find_by_id(id).await?;
    let mut blog = authorize_author_mutation(existing, id, identity.user_id())?;

    let req = body.into_inner();
    let changes = BlogChanges {
        title: req.title,
        content: req.content,
        image: req.image,
        category: req.category,
        tags: req.tags.map(|t| t.into_vec()),
    }
    .validate()?;

    blog.apply(changes);
    let updated = state.blogs.update_details(&blog).await.map_err(|e| match e {
        inkwell_core::RepoError::NotFound => blog_not_found(),
        other => other.into(),
    })?;
    tracing::info!(blog_id = %updated.id, "Blog updated");

    Ok(HttpResponse::Ok().json(populate_blog(state.users.as_ref(), updated).await?))
}

/// DELETE /api/blogs/{id} - author only. Comments on the blog are kept.
pub async fn delete_blog(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let existing = state.blogs.find_by_id(id).await?;
    let blog = authorize_author_mutation(existing, id, identity.user_id())?;

    state.blogs.delete(blog.id).await.map_err(|e| match e {
        inkwell_core::RepoError::NotFound => blog_not_found(),
        other => other.into(),
    })?;
    tracing::info!(blog_id = %id, "Blog deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse { id }))
}

/// POST /api/blogs/{id}/clap - public, unlimited
pub async fn clap_blog(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let claps = state
        .blogs
        .increment_claps(path.into_inner())
        .await?
        .ok_or_else(blog_not_found)?;

    Ok(HttpResponse::Ok().json(ClapResponse { claps }))
}
