//! Role-based access control engine for Rolegate
//!
//! Three surfaces, all wired through the `rolegate-interfaces` repository
//! traits:
//!
//! - [`AssignmentService`] mutates user/role assignments and the
//!   role-permission matrix, with explicit replace (sync) and union (append)
//!   semantics.
//! - [`AuthorizationResolver`] decides access for a principal against a
//!   required-capability list and selects a redirect target on denial.
//! - [`RolesFacade`] is the read-only query surface for route guards, CLIs
//!   and admin UIs.

pub mod error;
pub mod facade;
pub mod resolver;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{RbacError, RbacResult};
pub use facade::{MatrixData, RolesFacade};
pub use resolver::{AccessDecision, AuthorizationResolver, Principal, DENIAL_MESSAGE};
pub use service::AssignmentService;
