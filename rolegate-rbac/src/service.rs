//! Assignment service: mutations over user assignments and the matrix
//!
//! Naming is deliberate: `replace_*` operations carry sync semantics (the
//! result contains exactly the given values) and `union_*` operations carry
//! append semantics (existing values are never removed). Every permission
//! list is validated against the catalog before anything is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use rolegate_config::{CatalogConfig, UnknownNamePolicy};
use rolegate_interfaces::{
    AssignmentRepository, MatrixRepository, Role, RoleId, RoleRepository, UserDirectory, UserId,
};

use crate::error::{RbacError, RbacResult};

/// Business logic for assigning permissions and roles
pub struct AssignmentService {
    roles: Arc<dyn RoleRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    matrix: Arc<dyn MatrixRepository>,
    users: Arc<dyn UserDirectory>,
    catalog: CatalogConfig,
}

impl AssignmentService {
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        matrix: Arc<dyn MatrixRepository>,
        users: Arc<dyn UserDirectory>,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            roles,
            assignments,
            matrix,
            users,
            catalog,
        }
    }

    /// Idempotent find-or-create of a role by name
    pub async fn ensure_role(&self, name: &str) -> RbacResult<Role> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RbacError::validation("role name cannot be empty"));
        }

        Ok(self.roles.find_or_create(name).await?)
    }

    /// Union the user's direct permission grants with `names` (append
    /// semantics, idempotent). Returns the resulting held set.
    pub async fn union_user_permissions(&self, user_id: UserId, names: &[String]) -> RbacResult<Vec<String>> {
        self.ensure_user(user_id).await?;
        let valid = self.filter_permissions(names)?;

        self.assignments.add_user_permissions(user_id, &valid).await?;
        info!(user_id, granted = valid.len(), "unioned user permissions");

        Ok(self.assignments.permissions_for_user(user_id).await?)
    }

    /// Replace the user's direct permission grants with exactly `names`
    /// (sync semantics). Returns the resulting held set.
    pub async fn replace_user_permissions(&self, user_id: UserId, names: &[String]) -> RbacResult<Vec<String>> {
        self.ensure_user(user_id).await?;
        let valid = self.filter_permissions(names)?;

        self.assignments.replace_user_permissions(user_id, &valid).await?;
        info!(user_id, granted = valid.len(), "replaced user permissions");

        Ok(self.assignments.permissions_for_user(user_id).await?)
    }

    /// Set the role's matrix row to exactly `names`: listed catalog
    /// permissions become enabled, every other catalog permission is
    /// explicitly disabled. Returns the resulting enabled set.
    pub async fn replace_role_permissions(&self, role_id: RoleId, names: &[String]) -> RbacResult<Vec<String>> {
        self.ensure_role_id(role_id).await?;
        let valid = self.filter_permissions(names)?;

        // Enumerate the whole catalog so a single update fully determines
        // the row; the store itself leaves omitted cells unchanged.
        let row: HashMap<String, bool> = self
            .catalog
            .permissions()
            .iter()
            .map(|p| (p.clone(), valid.contains(p)))
            .collect();

        let updates = HashMap::from([(role_id, row)]);
        self.matrix.update_matrix(&updates).await?;
        info!(role_id, enabled = valid.len(), "replaced role permissions");

        Ok(self.matrix.enabled_permissions(role_id, self.catalog.permissions()).await?)
    }

    /// Union the role's enabled permissions with `names` (append
    /// semantics). Returns the resulting enabled set.
    ///
    /// Writes a sparse `{name: true}` upsert for only the given names:
    /// omitted cells keep their prior state, so concurrent unions for
    /// disjoint names commute instead of overwriting each other's rows.
    pub async fn union_role_permissions(&self, role_id: RoleId, names: &[String]) -> RbacResult<Vec<String>> {
        self.ensure_role_id(role_id).await?;
        let valid = self.filter_permissions(names)?;

        if !valid.is_empty() {
            let row: HashMap<String, bool> = valid.iter().map(|p| (p.clone(), true)).collect();
            let updates = HashMap::from([(role_id, row)]);
            self.matrix.update_matrix(&updates).await?;
            info!(role_id, enabled = valid.len(), "unioned role permissions");
        }

        Ok(self.matrix.enabled_permissions(role_id, self.catalog.permissions()).await?)
    }

    /// Replace the user's role set with exactly the named roles (sync
    /// semantics). Every name must resolve to an existing role. Returns the
    /// resulting held roles.
    pub async fn replace_user_roles(&self, user_id: UserId, role_names: &[String]) -> RbacResult<Vec<Role>> {
        self.ensure_user(user_id).await?;
        let roles = self.resolve_roles(role_names).await?;

        let role_ids: Vec<RoleId> = roles.iter().map(|r| r.id).collect();
        self.assignments.replace_user_roles(user_id, &role_ids).await?;
        info!(user_id, roles = role_ids.len(), "replaced user roles");

        Ok(self.assignments.roles_for_user(user_id).await?)
    }

    /// Union the user's role set with the named roles (append semantics:
    /// never removes a held role). Inserts only the missing links, so
    /// concurrent unions for disjoint role sets commute. Returns the
    /// resulting held roles.
    pub async fn union_user_roles(&self, user_id: UserId, role_names: &[String]) -> RbacResult<Vec<Role>> {
        self.ensure_user(user_id).await?;
        let new_roles = self.resolve_roles(role_names).await?;

        let role_ids: Vec<RoleId> = new_roles.iter().map(|r| r.id).collect();
        self.assignments.add_user_roles(user_id, &role_ids).await?;
        info!(user_id, roles = role_ids.len(), "unioned user roles");

        Ok(self.assignments.roles_for_user(user_id).await?)
    }

    /// Apply the catalog's unknown-name policy to a candidate list
    fn filter_permissions(&self, names: &[String]) -> RbacResult<Vec<String>> {
        let (known, unknown) = self.catalog.partition_known(names);

        if !unknown.is_empty() {
            match self.catalog.unknown_names {
                UnknownNamePolicy::Drop => {
                    for name in &unknown {
                        warn!(permission = %name, "dropping permission name outside the catalog");
                    }
                }
                UnknownNamePolicy::Reject => {
                    return Err(RbacError::UnknownPermissions { names: unknown });
                }
            }
        }

        Ok(known)
    }

    async fn ensure_user(&self, user_id: UserId) -> RbacResult<()> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(RbacError::UserNotFound { user_id })
        }
    }

    async fn ensure_role_id(&self, role_id: RoleId) -> RbacResult<()> {
        if self.roles.find_by_id(role_id).await?.is_some() {
            Ok(())
        } else {
            Err(RbacError::role_not_found(role_id.to_string()))
        }
    }

    /// Resolve role names to roles, deduplicating while preserving order.
    /// A name with no matching role fails the whole operation.
    async fn resolve_roles(&self, role_names: &[String]) -> RbacResult<Vec<Role>> {
        let mut unique: Vec<String> = Vec::new();
        for name in role_names {
            if !unique.contains(name) {
                unique.push(name.clone());
            }
        }

        let found = self.roles.find_by_names(&unique).await?;
        if found.len() != unique.len() {
            let missing = unique
                .iter()
                .find(|name| !found.iter().any(|r| &r.name == *name))
                .cloned()
                .unwrap_or_default();
            return Err(RbacError::role_not_found(missing));
        }

        Ok(found)
    }
}
