//! Authorization decisions for route guards
//!
//! The resolver answers one question: may this principal pass a guard that
//! requires any of a list of role or permission names? A denial carries the
//! redirect route the caller should send the user to, chosen by walking the
//! principal's HELD names in deterministic order against the configured
//! redirect targets.

use std::collections::HashSet;
use std::sync::Arc;

use rolegate_config::{CatalogConfig, RedirectMap, RedirectsConfig};
use rolegate_interfaces::{AssignmentRepository, MatrixRepository, UserId};

use crate::error::RbacResult;

/// Flash message attached to denial redirects
pub const DENIAL_MESSAGE: &str = "You do not have permission to access this page.";

/// An authenticated user as seen by the guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Request may proceed
    Granted,
    /// No authenticated principal; terminal, never redirected
    DeniedAnonymous,
    /// Authenticated but lacking every required name
    Denied { redirect: String },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Decides access against required role or permission lists
pub struct AuthorizationResolver {
    assignments: Arc<dyn AssignmentRepository>,
    matrix: Arc<dyn MatrixRepository>,
    catalog: CatalogConfig,
    redirects: RedirectsConfig,
}

impl AuthorizationResolver {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        matrix: Arc<dyn MatrixRepository>,
        catalog: CatalogConfig,
        redirects: RedirectsConfig,
    ) -> Self {
        Self {
            assignments,
            matrix,
            catalog,
            redirects,
        }
    }

    /// Grant when the principal holds at least one of `required` as a role.
    ///
    /// On denial the redirect is selected from the principal's held roles in
    /// assignment order, not from the required list, so two guards with
    /// different requirements send the same user to the same place.
    pub async fn has_any_role(
        &self,
        principal: Option<&Principal>,
        required: &[String],
    ) -> RbacResult<AccessDecision> {
        let Some(principal) = principal else {
            return Ok(AccessDecision::DeniedAnonymous);
        };

        let held = self.assignments.roles_for_user(principal.user_id).await?;
        let required: HashSet<&str> = required.iter().map(String::as_str).collect();

        if held.iter().any(|role| required.contains(role.name.as_str())) {
            return Ok(AccessDecision::Granted);
        }

        let held_names: Vec<&str> = held.iter().map(|role| role.name.as_str()).collect();
        Ok(self.deny(&held_names, &self.redirects.roles, principal))
    }

    /// Grant when the principal's effective permission set intersects
    /// `required`. Effective permissions are direct grants plus every
    /// permission enabled in the matrix for a held role.
    pub async fn has_any_permission(
        &self,
        principal: Option<&Principal>,
        required: &[String],
    ) -> RbacResult<AccessDecision> {
        let Some(principal) = principal else {
            return Ok(AccessDecision::DeniedAnonymous);
        };

        let held = effective_permissions(
            self.assignments.as_ref(),
            self.matrix.as_ref(),
            &self.catalog,
            principal.user_id,
        )
        .await?;
        let required: HashSet<&str> = required.iter().map(String::as_str).collect();

        if held.iter().any(|name| required.contains(name.as_str())) {
            return Ok(AccessDecision::Granted);
        }

        let held_names: Vec<&str> = held.iter().map(String::as_str).collect();
        Ok(self.deny(&held_names, &self.redirects.permissions, principal))
    }

    fn deny(&self, held: &[&str], map: &RedirectMap, principal: &Principal) -> AccessDecision {
        let redirect = held
            .iter()
            .find_map(|name| map.target(name))
            .unwrap_or(&map.default)
            .to_string();

        tracing::debug!(
            user_id = principal.user_id,
            redirect = %redirect,
            "access denied"
        );
        AccessDecision::Denied { redirect }
    }
}

/// Union of a user's direct permission grants and the matrix-enabled
/// permissions of each held role. Order is deterministic: direct grants in
/// stored order, then per role (in assignment order) the enabled permissions
/// in catalog order, duplicates keeping their first position.
pub(crate) async fn effective_permissions(
    assignments: &dyn AssignmentRepository,
    matrix: &dyn MatrixRepository,
    catalog: &CatalogConfig,
    user_id: UserId,
) -> RbacResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut effective = Vec::new();

    for name in assignments.permissions_for_user(user_id).await? {
        if seen.insert(name.clone()) {
            effective.push(name);
        }
    }

    for role in assignments.roles_for_user(user_id).await? {
        let enabled = matrix.enabled_permissions(role.id, catalog.permissions()).await?;
        for name in enabled {
            if seen.insert(name.clone()) {
                effective.push(name);
            }
        }
    }

    Ok(effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;
    use std::collections::HashMap;
    use rolegate_interfaces::RoleId;

    fn catalog(names: &[&str]) -> CatalogConfig {
        CatalogConfig {
            permissions: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn redirects(role_targets: &[(&str, &str)], default: &str) -> RedirectsConfig {
        let mut config = RedirectsConfig::default();
        config.roles.default = default.to_string();
        config.permissions.default = default.to_string();
        for (name, route) in role_targets {
            config.roles.targets.insert(name.to_string(), route.to_string());
            config.permissions.targets.insert(name.to_string(), route.to_string());
        }
        config
    }

    fn resolver(store: &InMemoryStore, catalog: CatalogConfig, redirects: RedirectsConfig) -> AuthorizationResolver {
        AuthorizationResolver::new(store.assignments(), store.matrix(), catalog, redirects)
    }

    async fn grant_role(store: &InMemoryStore, user_id: UserId, name: &str) -> RoleId {
        let role = store.roles().find_or_create(name).await.unwrap();
        let mut held: Vec<RoleId> = store
            .assignments()
            .roles_for_user(user_id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        held.push(role.id);
        store.assignments().replace_user_roles(user_id, &held).await.unwrap();
        role.id
    }

    #[tokio::test]
    async fn test_anonymous_is_denied_without_redirect() {
        let store = InMemoryStore::new();
        let resolver = resolver(&store, catalog(&["edit posts"]), redirects(&[], "home"));

        let decision = resolver.has_any_role(None, &["admin".to_string()]).await.unwrap();
        assert_eq!(decision, AccessDecision::DeniedAnonymous);

        let decision = resolver
            .has_any_permission(None, &["edit posts".to_string()])
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::DeniedAnonymous);
    }

    #[tokio::test]
    async fn test_role_intersection_grants() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        grant_role(&store, user, "editor").await;

        let resolver = resolver(&store, catalog(&["edit posts"]), redirects(&[], "home"));
        let decision = resolver
            .has_any_role(
                Some(&Principal::new(user)),
                &["admin".to_string(), "editor".to_string()],
            )
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_denial_redirects_by_held_role() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        grant_role(&store, user, "editor").await;

        let resolver = resolver(
            &store,
            catalog(&["edit posts"]),
            redirects(&[("editor", "editor-home")], "home"),
        );
        let decision = resolver
            .has_any_role(Some(&Principal::new(user)), &["admin".to_string()])
            .await
            .unwrap();
        assert_eq!(
            decision,
            AccessDecision::Denied {
                redirect: "editor-home".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_denial_falls_back_to_default() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        grant_role(&store, user, "guest").await;

        let resolver = resolver(
            &store,
            catalog(&["edit posts"]),
            redirects(&[("editor", "editor-home")], "home"),
        );
        let decision = resolver
            .has_any_role(Some(&Principal::new(user)), &["admin".to_string()])
            .await
            .unwrap();
        assert_eq!(
            decision,
            AccessDecision::Denied {
                redirect: "home".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_denial_redirect_first_held_match_wins() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        grant_role(&store, user, "viewer").await;
        grant_role(&store, user, "editor").await;
        grant_role(&store, user, "reviewer").await;

        let resolver = resolver(
            &store,
            catalog(&["edit posts"]),
            redirects(&[("editor", "editor-home"), ("reviewer", "review-queue")], "home"),
        );
        let decision = resolver
            .has_any_role(Some(&Principal::new(user)), &["admin".to_string()])
            .await
            .unwrap();
        assert_eq!(
            decision,
            AccessDecision::Denied {
                redirect: "editor-home".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_direct_permission_grants() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        store
            .assignments()
            .add_user_permissions(user, &["edit posts".to_string()])
            .await
            .unwrap();

        let resolver = resolver(&store, catalog(&["edit posts", "delete posts"]), redirects(&[], "home"));
        let decision = resolver
            .has_any_permission(Some(&Principal::new(user)), &["edit posts".to_string()])
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_matrix_permission_grants_through_role() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        let role_id = grant_role(&store, user, "editor").await;

        let mut updates = HashMap::new();
        updates.insert(
            role_id,
            HashMap::from([("edit posts".to_string(), true)]),
        );
        store.matrix().update_matrix(&updates).await.unwrap();

        let resolver = resolver(&store, catalog(&["edit posts", "delete posts"]), redirects(&[], "home"));
        let decision = resolver
            .has_any_permission(Some(&Principal::new(user)), &["edit posts".to_string()])
            .await
            .unwrap();
        assert!(decision.is_granted());
    }

    #[tokio::test]
    async fn test_permission_denial_walks_held_set_not_required() {
        // Redirect selection looks at what the user HAS, never at what the
        // guard asked for.
        let store = InMemoryStore::new();
        let user = store.seed_user();
        store
            .assignments()
            .add_user_permissions(user, &["edit posts".to_string()])
            .await
            .unwrap();

        let resolver = resolver(
            &store,
            catalog(&["edit posts", "delete posts"]),
            redirects(&[("edit posts", "editor-home"), ("delete posts", "mod-queue")], "home"),
        );
        let decision = resolver
            .has_any_permission(Some(&Principal::new(user)), &["delete posts".to_string()])
            .await
            .unwrap();
        assert_eq!(
            decision,
            AccessDecision::Denied {
                redirect: "editor-home".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_effective_permissions_order_and_dedup() {
        let store = InMemoryStore::new();
        let user = store.seed_user();
        store
            .assignments()
            .add_user_permissions(user, &["delete posts".to_string()])
            .await
            .unwrap();
        let role_id = grant_role(&store, user, "editor").await;

        let mut updates = HashMap::new();
        updates.insert(
            role_id,
            HashMap::from([
                ("edit posts".to_string(), true),
                ("delete posts".to_string(), true),
            ]),
        );
        store.matrix().update_matrix(&updates).await.unwrap();

        let cat = catalog(&["edit posts", "delete posts", "publish posts"]);
        let effective = effective_permissions(
            store.assignments().as_ref(),
            store.matrix().as_ref(),
            &cat,
            user,
        )
        .await
        .unwrap();

        // Direct grant first, then role permissions in catalog order with the
        // duplicate dropped.
        assert_eq!(
            effective,
            vec!["delete posts".to_string(), "edit posts".to_string()]
        );
    }

    #[tokio::test]
    async fn test_user_with_no_grants_denied_to_default() {
        let store = InMemoryStore::new();
        let user = store.seed_user();

        let resolver = resolver(&store, catalog(&["edit posts"]), redirects(&[], "home"));
        let decision = resolver
            .has_any_permission(Some(&Principal::new(user)), &["edit posts".to_string()])
            .await
            .unwrap();
        assert_eq!(
            decision,
            AccessDecision::Denied {
                redirect: "home".to_string()
            }
        );
    }
}
