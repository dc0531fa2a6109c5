//! User existence checks against the host application's users table

use async_trait::async_trait;
use sea_orm::{EntityTrait, QuerySelect};

use rolegate_interfaces::{DatabaseError, Repository, UserDirectory, UserId};

use crate::connection::DatabaseConnection;
use crate::entities::Users;

/// SeaORM implementation of the UserDirectory
#[derive(Clone)]
pub struct SeaOrmUserDirectory {
    db: DatabaseConnection,
}

impl SeaOrmUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn exists(&self, user_id: UserId) -> Result<bool, DatabaseError> {
        let user = Users::find_by_id(user_id)
            .one(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to look up user: {}", e)))?;

        Ok(user.is_some())
    }
}

#[async_trait]
impl Repository for SeaOrmUserDirectory {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Users::find()
            .limit(1)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("User directory health check failed: {}", e),
            })?;

        Ok(())
    }
}
