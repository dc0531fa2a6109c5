//! Role repository implementation using SeaORM

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use rolegate_interfaces::{DatabaseError, Repository, Role, RoleId, RoleRepository};

use crate::connection::DatabaseConnection;
use crate::entities::{roles, Roles};

/// SeaORM implementation of the RoleRepository
#[derive(Clone)]
pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_role(model: roles::Model) -> Role {
        Role {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DatabaseError> {
        let role = Roles::find_by_id(id)
            .one(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to find role by id: {}", e)))?;

        Ok(role.map(Self::to_role))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DatabaseError> {
        let role = Roles::find()
            .filter(roles::Column::Name.eq(name))
            .one(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to find role by name: {}", e)))?;

        Ok(role.map(Self::to_role))
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Role>, DatabaseError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let models = Roles::find()
            .filter(roles::Column::Name.is_in(names.iter().map(String::as_str)))
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to find roles by name: {}", e)))?;

        let mut by_name: HashMap<String, roles::Model> =
            models.into_iter().map(|m| (m.name.clone(), m)).collect();

        // Preserve request order; unknown names are simply absent.
        Ok(names
            .iter()
            .filter_map(|name| by_name.remove(name))
            .map(Self::to_role)
            .collect())
    }

    async fn find_or_create(&self, name: &str) -> Result<Role, DatabaseError> {
        if let Some(role) = self.find_by_name(name).await? {
            return Ok(role);
        }

        let active_model = roles::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to create role: {}", e)))?;

        Ok(Self::to_role(result))
    }

    async fn list(&self) -> Result<Vec<Role>, DatabaseError> {
        let models = Roles::find()
            .order_by_asc(roles::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to list roles: {}", e)))?;

        Ok(models.into_iter().map(Self::to_role).collect())
    }
}

#[async_trait]
impl Repository for SeaOrmRoleRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Roles::find()
            .limit(1)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("Role repository health check failed: {}", e),
            })?;

        Ok(())
    }
}
