//! Read-only query surface over roles, assignments and the matrix
//!
//! Route handlers, admin screens and the CLI all read through this facade so
//! the answer to "what can this user do" is computed in exactly one place.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use rolegate_config::CatalogConfig;
use rolegate_interfaces::{
    AssignmentRepository, MatrixRepository, Role, RoleId, RoleRepository, UserId,
};

use crate::error::{RbacError, RbacResult};
use crate::resolver::effective_permissions;

/// Everything an admin matrix screen needs in one payload
#[derive(Debug, Clone, Serialize)]
pub struct MatrixData {
    /// Catalog permissions in configured order
    pub permissions: Vec<String>,
    /// All persisted roles
    pub roles: Vec<Role>,
    /// Full cell map, one entry per role and catalog permission
    pub role_permissions: HashMap<RoleId, HashMap<String, bool>>,
}

/// Read-only RBAC queries
pub struct RolesFacade {
    roles: Arc<dyn RoleRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    matrix: Arc<dyn MatrixRepository>,
    catalog: CatalogConfig,
}

impl RolesFacade {
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        matrix: Arc<dyn MatrixRepository>,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            roles,
            assignments,
            matrix,
            catalog,
        }
    }

    /// Whether the user holds the named role
    pub async fn has_role(&self, user_id: UserId, name: &str) -> RbacResult<bool> {
        let held = self.assignments.roles_for_user(user_id).await?;
        Ok(held.iter().any(|role| role.name == name))
    }

    /// Whether the name is in the user's effective permission set, direct
    /// grants and matrix-derived role permissions alike
    pub async fn has_permission(&self, user_id: UserId, name: &str) -> RbacResult<bool> {
        let effective = self.user_permissions(user_id).await?;
        Ok(effective.iter().any(|held| held == name))
    }

    /// All persisted roles
    pub async fn list_roles(&self) -> RbacResult<Vec<Role>> {
        Ok(self.roles.list().await?)
    }

    /// The permission vocabulary in configured order
    pub fn list_permissions(&self) -> Vec<String> {
        self.catalog.permissions().to_vec()
    }

    /// Roles assigned to a user, in assignment order
    pub async fn user_roles(&self, user_id: UserId) -> RbacResult<Vec<Role>> {
        Ok(self.assignments.roles_for_user(user_id).await?)
    }

    /// The user's effective permissions in deterministic order
    pub async fn user_permissions(&self, user_id: UserId) -> RbacResult<Vec<String>> {
        effective_permissions(
            self.assignments.as_ref(),
            self.matrix.as_ref(),
            &self.catalog,
            user_id,
        )
        .await
    }

    /// Permissions enabled for a role, in catalog order. The role must exist.
    pub async fn role_permissions(&self, role_name: &str) -> RbacResult<Vec<String>> {
        let role = self
            .roles
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| RbacError::role_not_found(role_name))?;
        Ok(self
            .matrix
            .enabled_permissions(role.id, self.catalog.permissions())
            .await?)
    }

    /// Catalog, roles and the full cell map for a matrix editor
    pub async fn matrix_data(&self) -> RbacResult<MatrixData> {
        let roles = self.roles.list().await?;
        let role_permissions = self.matrix.matrix(self.catalog.permissions()).await?;
        Ok(MatrixData {
            permissions: self.catalog.permissions().to_vec(),
            roles,
            role_permissions,
        })
    }
}
