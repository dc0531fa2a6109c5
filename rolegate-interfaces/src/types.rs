//! Shared domain types used across repository and service boundaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Integer identifier of a host-application user.
pub type UserId = i32;

/// Integer identifier of a persisted role.
pub type RoleId = i32;

/// A named, persisted group to which permissions can be attached and which
/// can be assigned to users.
///
/// Roles are created on first reference (find-or-create by name) and never
/// implicitly deleted. Permission names are not modeled as an entity: they
/// are a vocabulary constraint owned by the configuration catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
