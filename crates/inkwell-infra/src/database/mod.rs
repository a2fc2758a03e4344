//! Persistence: PostgreSQL via SeaORM, and an in-memory fallback.

mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory::{InMemoryBlogRepository, InMemoryCommentRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresBlogRepository, PostgresCommentRepository, PostgresUserRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
