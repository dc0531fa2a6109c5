//! User assignment repository implementation using SeaORM
//!
//! Sync-style operations (`replace_*`) run inside a single transaction so a
//! failed write cannot leave a user with a partially applied assignment set.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use rolegate_interfaces::{AssignmentRepository, DatabaseError, Repository, Role, RoleId, UserId};

use crate::connection::DatabaseConnection;
use crate::entities::{roles, user_permissions, user_roles, UserPermissions, UserRoles};

/// SeaORM implementation of the AssignmentRepository
#[derive(Clone)]
pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<Role>, DatabaseError> {
        let links = UserRoles::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .order_by_asc(user_roles::Column::Id)
            .find_also_related(roles::Entity)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to load roles for user: {}", e)))?;

        Ok(links
            .into_iter()
            .filter_map(|(_, role)| role)
            .map(|model| Role {
                id: model.id,
                name: model.name,
                created_at: model.created_at,
            })
            .collect())
    }

    async fn permissions_for_user(&self, user_id: UserId) -> Result<Vec<String>, DatabaseError> {
        let grants = UserPermissions::find()
            .filter(user_permissions::Column::UserId.eq(user_id))
            .order_by_asc(user_permissions::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to load permissions for user: {}", e)))?;

        Ok(grants.into_iter().map(|g| g.permission).collect())
    }

    async fn replace_user_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> Result<(), DatabaseError> {
        let role_ids = role_ids.to_vec();

        self.db
            .get_connection()
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    // Drop links outside the target set
                    let mut delete = UserRoles::delete_many().filter(user_roles::Column::UserId.eq(user_id));
                    if !role_ids.is_empty() {
                        delete = delete.filter(user_roles::Column::RoleId.is_not_in(role_ids.clone()));
                    }
                    delete.exec(txn).await?;

                    // Insert missing links, keeping existing rows (and their
                    // assignment order) untouched
                    let existing: Vec<RoleId> = UserRoles::find()
                        .filter(user_roles::Column::UserId.eq(user_id))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|link| link.role_id)
                        .collect();

                    let now = Utc::now();
                    let missing: Vec<user_roles::ActiveModel> = role_ids
                        .iter()
                        .filter(|id| !existing.contains(id))
                        .map(|id| user_roles::ActiveModel {
                            user_id: Set(user_id),
                            role_id: Set(*id),
                            assigned_at: Set(now),
                            ..Default::default()
                        })
                        .collect();

                    if !missing.is_empty() {
                        UserRoles::insert_many(missing).exec(txn).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|e| DatabaseError::Transaction {
                message: format!("Failed to replace user roles: {}", e),
            })
    }

    async fn add_user_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> Result<(), DatabaseError> {
        let role_ids = role_ids.to_vec();

        self.db
            .get_connection()
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let existing: Vec<RoleId> = UserRoles::find()
                        .filter(user_roles::Column::UserId.eq(user_id))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|link| link.role_id)
                        .collect();

                    let now = Utc::now();
                    let missing: Vec<user_roles::ActiveModel> = role_ids
                        .iter()
                        .filter(|id| !existing.contains(id))
                        .map(|id| user_roles::ActiveModel {
                            user_id: Set(user_id),
                            role_id: Set(*id),
                            assigned_at: Set(now),
                            ..Default::default()
                        })
                        .collect();

                    if !missing.is_empty() {
                        UserRoles::insert_many(missing).exec(txn).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|e| DatabaseError::Transaction {
                message: format!("Failed to add user roles: {}", e),
            })
    }

    async fn add_user_permissions(&self, user_id: UserId, permissions: &[String]) -> Result<(), DatabaseError> {
        let permissions = permissions.to_vec();

        self.db
            .get_connection()
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let held: Vec<String> = UserPermissions::find()
                        .filter(user_permissions::Column::UserId.eq(user_id))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|g| g.permission)
                        .collect();

                    let now = Utc::now();
                    let new_grants: Vec<user_permissions::ActiveModel> = permissions
                        .iter()
                        .filter(|p| !held.contains(p))
                        .map(|p| user_permissions::ActiveModel {
                            user_id: Set(user_id),
                            permission: Set(p.clone()),
                            assigned_at: Set(now),
                            ..Default::default()
                        })
                        .collect();

                    if !new_grants.is_empty() {
                        UserPermissions::insert_many(new_grants).exec(txn).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|e| DatabaseError::Transaction {
                message: format!("Failed to add user permissions: {}", e),
            })
    }

    async fn replace_user_permissions(&self, user_id: UserId, permissions: &[String]) -> Result<(), DatabaseError> {
        let permissions = permissions.to_vec();

        self.db
            .get_connection()
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let mut delete =
                        UserPermissions::delete_many().filter(user_permissions::Column::UserId.eq(user_id));
                    if !permissions.is_empty() {
                        delete = delete.filter(user_permissions::Column::Permission.is_not_in(permissions.clone()));
                    }
                    delete.exec(txn).await?;

                    let held: Vec<String> = UserPermissions::find()
                        .filter(user_permissions::Column::UserId.eq(user_id))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|g| g.permission)
                        .collect();

                    let now = Utc::now();
                    let missing: Vec<user_permissions::ActiveModel> = permissions
                        .iter()
                        .filter(|p| !held.contains(p))
                        .map(|p| user_permissions::ActiveModel {
                            user_id: Set(user_id),
                            permission: Set(p.clone()),
                            assigned_at: Set(now),
                            ..Default::default()
                        })
                        .collect();

                    if !missing.is_empty() {
                        UserPermissions::insert_many(missing).exec(txn).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|e| DatabaseError::Transaction {
                message: format!("Failed to replace user permissions: {}", e),
            })
    }
}

#[async_trait]
impl Repository for SeaOrmAssignmentRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        UserRoles::find()
            .limit(1)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("Assignment repository health check failed: {}", e),
            })?;

        Ok(())
    }
}
