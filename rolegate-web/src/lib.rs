//! Axum route guards for Rolegate
//!
//! Two middleware guards, one per check kind, both driven by an
//! [`AuthorizationResolver`](rolegate_rbac::AuthorizationResolver) handed in
//! as state. The host application's authentication layer is expected to
//! insert a [`CurrentUser`] request extension; these guards never parse
//! credentials themselves.

pub mod middleware;

pub use middleware::{require_any_permission, require_any_role, CurrentUser, PermissionGuard, RoleGuard};
