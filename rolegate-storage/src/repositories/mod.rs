//! SeaORM implementations of the rolegate-interfaces repository traits

pub mod assignment_repository;
pub mod matrix_repository;
pub mod role_repository;
pub mod user_directory;

pub use assignment_repository::SeaOrmAssignmentRepository;
pub use matrix_repository::SeaOrmMatrixRepository;
pub use role_repository::SeaOrmRoleRepository;
pub use user_directory::SeaOrmUserDirectory;

use std::sync::Arc;

use rolegate_interfaces::{AssignmentRepository, MatrixRepository, RoleRepository, UserDirectory};

use crate::connection::DatabaseConnection;

/// Factory wiring all repositories onto one shared connection
#[derive(Clone)]
pub struct RepositoryFactory {
    db: DatabaseConnection,
}

impl RepositoryFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn role_repository(&self) -> Arc<dyn RoleRepository> {
        Arc::new(SeaOrmRoleRepository::new(self.db.clone()))
    }

    pub fn assignment_repository(&self) -> Arc<dyn AssignmentRepository> {
        Arc::new(SeaOrmAssignmentRepository::new(self.db.clone()))
    }

    pub fn matrix_repository(&self) -> Arc<dyn MatrixRepository> {
        Arc::new(SeaOrmMatrixRepository::new(self.db.clone()))
    }

    pub fn user_directory(&self) -> Arc<dyn UserDirectory> {
        Arc::new(SeaOrmUserDirectory::new(self.db.clone()))
    }
}
