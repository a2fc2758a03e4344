//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog platform.
//! This crate contains the entities, the ownership policy and the ports
//! that infrastructure implements. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;

pub use error::{DomainError, RepoError};
