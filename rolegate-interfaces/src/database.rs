//! Database repository interfaces
//!
//! These traits define the storage contracts for roles, user assignments and
//! the role-permission matrix. They enable dependency injection and testing
//! through interface segregation: the rbac engine depends only on this crate,
//! never on a concrete database backend.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::types::{Role, RoleId, UserId};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Transaction error: {message}")]
    Transaction { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Repository for persisted roles.
#[async_trait]
pub trait RoleRepository: Repository {
    /// Find a role by integer id
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DatabaseError>;

    /// Find a role by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DatabaseError>;

    /// Find roles by name, preserving the order of `names` in the result.
    /// Unknown names are simply absent from the result.
    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Role>, DatabaseError>;

    /// Idempotent find-or-create by name
    async fn find_or_create(&self, name: &str) -> Result<Role, DatabaseError>;

    /// List all roles in creation order
    async fn list(&self) -> Result<Vec<Role>, DatabaseError>;
}

/// Existence checks against the host application's user table.
///
/// This is the only coupling Rolegate has to the host's authentication
/// layer; account lifecycle (passwords, sessions, tokens) stays out of scope.
#[async_trait]
pub trait UserDirectory: Repository {
    /// Whether a user with this id exists
    async fn exists(&self, user_id: UserId) -> Result<bool, DatabaseError>;
}

/// Repository for user-role links and direct user-permission grants.
#[async_trait]
pub trait AssignmentRepository: Repository {
    /// Roles held by a user, in stored (assignment) order
    async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<Role>, DatabaseError>;

    /// Direct permission grants held by a user, in stored order
    async fn permissions_for_user(&self, user_id: UserId) -> Result<Vec<String>, DatabaseError>;

    /// Replace the user's role set with exactly `role_ids` (sync semantics).
    /// Runs in a single transaction: links not in `role_ids` are removed,
    /// missing ones inserted, existing ones left untouched.
    async fn replace_user_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> Result<(), DatabaseError>;

    /// Insert only the role links the user does not already hold, in a
    /// single transaction. Idempotent: never removes or rewrites a link, so
    /// concurrent calls for disjoint role sets commute.
    async fn add_user_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> Result<(), DatabaseError>;

    /// Insert only the permissions the user does not already hold.
    /// Idempotent: repeating the same call is a no-op.
    async fn add_user_permissions(&self, user_id: UserId, permissions: &[String]) -> Result<(), DatabaseError>;

    /// Replace the user's direct permission grants with exactly
    /// `permissions` (sync semantics), in a single transaction.
    async fn replace_user_permissions(&self, user_id: UserId, permissions: &[String]) -> Result<(), DatabaseError>;
}

/// Repository for the role-permission matrix.
#[async_trait]
pub trait MatrixRepository: Repository {
    /// Full materialized matrix: one row per known role, one column per
    /// catalog permission, `false` for absent cells.
    async fn matrix(&self, catalog: &[String]) -> Result<HashMap<RoleId, HashMap<String, bool>>, DatabaseError>;

    /// Permissions currently enabled for a role, in catalog order.
    async fn enabled_permissions(&self, role_id: RoleId, catalog: &[String]) -> Result<Vec<String>, DatabaseError>;

    /// Upsert matrix cells. For each role in `updates`, every mentioned
    /// `(permission, enabled)` pair is written to exactly that value;
    /// permissions omitted from a role's sub-map keep their prior state.
    /// The whole call commits atomically or not at all.
    async fn update_matrix(&self, updates: &HashMap<RoleId, HashMap<String, bool>>) -> Result<(), DatabaseError>;
}
