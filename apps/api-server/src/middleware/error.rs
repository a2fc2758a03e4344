//! Error handling - every failure renders as `{ "message": ... }`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use inkwell_core::error::{DomainError, RepoError};
use inkwell_core::ports::AuthError;
use inkwell_shared::ErrorResponse;
use std::fmt;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    /// Authenticated, but not the owner. Reported as 401 like every other
    /// authorization failure of this API.
    Forbidden,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Forbidden => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Unauthorized(msg) => {
                ErrorResponse::new(msg.clone())
            }
            AppError::Forbidden => ErrorResponse::new("User not authorized"),
            AppError::Internal(detail) => {
                // The detail stays in the logs.
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) | DomainError::Duplicate(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized("Not authorized".to_string()),
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Internal(format!("Constraint violation: {msg}")),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::MissingAuth => AppError::Unauthorized("Not authorized, no token".to_string()),
            AuthError::TokenExpired => {
                AppError::Unauthorized("Not authorized, token expired".to_string())
            }
            AuthError::InvalidToken(reason) => {
                tracing::debug!(%reason, "Rejected bearer token");
                AppError::Unauthorized("Not authorized, token failed".to_string())
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
