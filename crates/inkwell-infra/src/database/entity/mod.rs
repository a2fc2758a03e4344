//! SeaORM entities. Table and column names match `apps/migration`.

pub mod blog;
pub mod comment;
pub mod user;
