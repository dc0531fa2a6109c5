//! Error types for RBAC operations

use rolegate_interfaces::DatabaseError;
use thiserror::Error;

/// Result type for RBAC operations
pub type RbacResult<T> = Result<T, RbacError>;

/// RBAC-specific errors
#[derive(Error, Debug)]
pub enum RbacError {
    /// Persistence failure in the underlying store
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// User not found
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i32 },

    /// Role not found
    #[error("Role not found: {role}")]
    RoleNotFound { role: String },

    /// Permission names outside the catalog under the strict-reject policy
    #[error("Unknown permission names: {}", names.join(", "))]
    UnknownPermissions { names: Vec<String> },

    /// Invalid input
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl RbacError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn role_not_found(role: impl Into<String>) -> Self {
        Self::RoleNotFound { role: role.into() }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. } | Self::RoleNotFound { .. })
    }
}
