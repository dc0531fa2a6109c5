//! Testing utilities: in-memory database with migrations applied

use rolegate_config::DatabaseConfig;
use sea_orm::{ActiveModelTrait, Set};

use crate::connection::{DatabaseConnection, StorageError};
use crate::entities::users;
use crate::repositories::RepositoryFactory;

/// An in-memory SQLite database with the Rolegate schema applied.
///
/// Uses a single pooled connection: each pooled `sqlite::memory:` connection
/// would otherwise be a distinct empty database.
pub struct TestDatabase {
    db: DatabaseConnection,
}

impl TestDatabase {
    pub async fn new() -> Result<Self, StorageError> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        };

        let db = DatabaseConnection::new(config).await?;
        db.migrate().await?;

        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn repositories(&self) -> RepositoryFactory {
        RepositoryFactory::new(self.db.clone())
    }

    /// Seed a host-application user for assignment tests
    pub async fn seed_user(&self, username: &str) -> Result<i32, StorageError> {
        let user = users::ActiveModel {
            username: Set(username.to_string()),
            ..Default::default()
        };

        let inserted = user.insert(self.db.get_connection()).await?;
        Ok(inserted.id)
    }
}
