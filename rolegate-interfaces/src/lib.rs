//! # Rolegate Interfaces
//!
//! Core interfaces and traits for the Rolegate access-control workspace.
//!
//! This crate is the neutral ground between the storage layer and the
//! authorization engine: repositories are expressed as traits so the engine,
//! middleware and CLI can be wired through dependency injection and tested
//! against in-memory implementations.

pub mod database;
pub mod types;

// Re-export commonly used types
pub use database::{
    AssignmentRepository, DatabaseError, MatrixRepository, Repository, RoleRepository, UserDirectory,
};
pub use types::{Role, RoleId, UserId};
