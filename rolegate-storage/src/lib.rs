//! Storage backend for Rolegate
//!
//! SeaORM entities, migrations and repository implementations of the
//! `rolegate-interfaces` traits. All multi-step writes (role sync, matrix
//! reconciliation) run inside a single transaction so a failed write leaves
//! previously committed state unchanged.

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use connection::{DatabaseConnection, StorageError};
pub use migrations::Migrator;
pub use repositories::{
    RepositoryFactory, SeaOrmAssignmentRepository, SeaOrmMatrixRepository, SeaOrmRoleRepository, SeaOrmUserDirectory,
};
