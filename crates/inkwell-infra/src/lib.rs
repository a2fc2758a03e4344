//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{InMemoryBlogRepository, InMemoryCommentRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
