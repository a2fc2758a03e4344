//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use inkwell_core::domain::{Registration, User, normalize_email};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{AuthError, BaseRepository, PasswordService, TokenService};
use inkwell_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::views::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(tokens: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let token = tokens.generate_token(user.id, &user.email)?;

    Ok(AuthResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let registration = Registration::new(&req.name, &req.email, &req.password)?;

    if state
        .users
        .find_by_email(&registration.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let password_hash = password_service.hash(&registration.password)?;
    let user = User::new(registration.name, registration.email, password_hash);

    // A concurrent registration can still win the race to the unique index.
    let saved = state.users.insert(user).await.map_err(|e| match e {
        RepoError::Constraint(_) => AppError::BadRequest("User already exists".to_string()),
        other => other.into(),
    })?;

    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(issue_token(token_service.get_ref().as_ref(), &saved)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&normalize_email(&req.email))
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password_service.verify(&req.password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::debug!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}
