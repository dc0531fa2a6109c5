//! Role-permission matrix repository implementation using SeaORM
//!
//! Matrix updates are sparse upserts: every mentioned cell is written to
//! exactly the given value, omitted cells keep their prior state, and the
//! whole update commits atomically.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait};

use rolegate_interfaces::{DatabaseError, MatrixRepository, Repository, RoleId};

use crate::connection::DatabaseConnection;
use crate::entities::{role_permissions, RolePermissions, Roles};

/// SeaORM implementation of the MatrixRepository
#[derive(Clone)]
pub struct SeaOrmMatrixRepository {
    db: DatabaseConnection,
}

impl SeaOrmMatrixRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatrixRepository for SeaOrmMatrixRepository {
    async fn matrix(&self, catalog: &[String]) -> Result<HashMap<RoleId, HashMap<String, bool>>, DatabaseError> {
        let role_ids: Vec<RoleId> = Roles::find()
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to load roles for matrix: {}", e)))?
            .into_iter()
            .map(|r| r.id)
            .collect();

        let cells = RolePermissions::find()
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to load matrix cells: {}", e)))?;

        // One row per role, one column per catalog permission, false for
        // absent cells. Cells for names outside the catalog are ignored.
        let mut matrix: HashMap<RoleId, HashMap<String, bool>> = role_ids
            .into_iter()
            .map(|id| (id, catalog.iter().map(|p| (p.clone(), false)).collect()))
            .collect();

        for cell in cells {
            if let Some(row) = matrix.get_mut(&cell.role_id) {
                if let Some(value) = row.get_mut(&cell.permission) {
                    *value = cell.enabled;
                }
            }
        }

        Ok(matrix)
    }

    async fn enabled_permissions(&self, role_id: RoleId, catalog: &[String]) -> Result<Vec<String>, DatabaseError> {
        let enabled: HashSet<String> = RolePermissions::find()
            .filter(role_permissions::Column::RoleId.eq(role_id))
            .filter(role_permissions::Column::Enabled.eq(true))
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::internal(format!("Failed to load role permissions: {}", e)))?
            .into_iter()
            .map(|cell| cell.permission)
            .collect();

        // Catalog order, not insertion order
        Ok(catalog.iter().filter(|p| enabled.contains(*p)).cloned().collect())
    }

    async fn update_matrix(&self, updates: &HashMap<RoleId, HashMap<String, bool>>) -> Result<(), DatabaseError> {
        if updates.is_empty() {
            return Ok(());
        }

        let updates = updates.clone();

        self.db
            .get_connection()
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    for (role_id, cells) in &updates {
                        for (permission, enabled) in cells {
                            let cell = role_permissions::ActiveModel {
                                role_id: Set(*role_id),
                                permission: Set(permission.clone()),
                                enabled: Set(*enabled),
                                ..Default::default()
                            };

                            RolePermissions::insert(cell)
                                .on_conflict(
                                    OnConflict::columns([
                                        role_permissions::Column::RoleId,
                                        role_permissions::Column::Permission,
                                    ])
                                    .update_column(role_permissions::Column::Enabled)
                                    .to_owned(),
                                )
                                .exec(txn)
                                .await?;
                        }
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|e| DatabaseError::Transaction {
                message: format!("Failed to update matrix: {}", e),
            })
    }
}

#[async_trait]
impl Repository for SeaOrmMatrixRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        RolePermissions::find()
            .limit(1)
            .all(self.db.get_connection())
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("Matrix repository health check failed: {}", e),
            })?;

        Ok(())
    }
}
