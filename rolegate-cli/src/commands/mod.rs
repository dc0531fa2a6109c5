//! Subcommand implementations

pub mod config;
pub mod permissions;
pub mod roles;
pub mod user_role;

use rolegate_rbac::{AssignmentService, RolesFacade};

/// Shared handles every subcommand works against
pub struct CommandContext {
    pub service: AssignmentService,
    pub facade: RolesFacade,
}

/// Split a comma-separated argument into trimmed, non-empty names.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) async fn test_context(catalog_names: &[&str]) -> (CommandContext, i32) {
    use rolegate_config::CatalogConfig;
    use rolegate_storage::testing::TestDatabase;

    let db = TestDatabase::new().await.unwrap();
    let user_id = db.seed_user("alice").await.unwrap();
    let repos = db.repositories();

    let catalog = CatalogConfig {
        permissions: catalog_names.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };

    let service = AssignmentService::new(
        repos.role_repository(),
        repos.assignment_repository(),
        repos.matrix_repository(),
        repos.user_directory(),
        catalog.clone(),
    );
    let facade = RolesFacade::new(
        repos.role_repository(),
        repos.assignment_repository(),
        repos.matrix_repository(),
        catalog,
    );

    (CommandContext { service, facade }, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_list_trims_and_drops_empty() {
        assert_eq!(
            parse_name_list("edit posts, delete posts, ,"),
            vec!["edit posts".to_string(), "delete posts".to_string()]
        );
        assert!(parse_name_list("  ,  ").is_empty());
    }
}
