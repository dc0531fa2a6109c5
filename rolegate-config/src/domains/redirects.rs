//! Deny-redirect configuration
//!
//! When an authorization check denies, the resolver walks the principal's
//! held roles (or permissions) and redirects to the first matching target,
//! falling back to `default`. Both maps are validated at load time so a
//! missing default is a startup failure, not a request-time surprise.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domains::catalog::CatalogConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::Validatable;

/// Redirect configuration for both guard kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Role-name -> route, consulted by the role guard
    pub roles: RedirectMap,

    /// Permission-name -> route, consulted by the permission guard
    pub permissions: RedirectMap,
}

/// A single redirect table: named targets plus a mandatory fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectMap {
    /// Fallback route when no held name matches a target
    pub default: String,

    /// Held-name -> route targets
    pub targets: HashMap<String, String>,
}

impl Default for RedirectMap {
    fn default() -> Self {
        Self {
            default: "index".to_string(),
            targets: HashMap::new(),
        }
    }
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            roles: RedirectMap::default(),
            permissions: RedirectMap::default(),
        }
    }
}

impl RedirectMap {
    /// Route for a held name, if one is configured
    pub fn target(&self, name: &str) -> Option<&str> {
        self.targets.get(name).map(String::as_str)
    }

    fn validate_map(&self, domain: &'static str) -> ConfigResult<()> {
        if self.default.trim().is_empty() {
            return Err(ConfigError::DomainError {
                domain: domain.to_string(),
                message: "default redirect route cannot be empty".to_string(),
            });
        }

        for (name, route) in &self.targets {
            if name.trim().is_empty() {
                return Err(ConfigError::DomainError {
                    domain: domain.to_string(),
                    message: "redirect keys cannot be empty".to_string(),
                });
            }
            if route.trim().is_empty() {
                return Err(ConfigError::DomainError {
                    domain: domain.to_string(),
                    message: format!("redirect route for '{}' cannot be empty", name),
                });
            }
        }

        Ok(())
    }
}

impl RedirectsConfig {
    /// Cross-domain check performed after both domains validate: permission
    /// redirect keys must name catalog permissions. Role keys are exempt
    /// because roles are created at runtime.
    pub fn validate_against_catalog(&self, catalog: &CatalogConfig) -> ConfigResult<()> {
        for name in self.permissions.targets.keys() {
            if !catalog.is_valid(name) {
                return Err(ConfigError::DomainError {
                    domain: "redirects.permissions".to_string(),
                    message: format!("redirect key '{}' is not a catalog permission", name),
                });
            }
        }
        Ok(())
    }
}

impl Validatable for RedirectsConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.roles.validate_map("redirects.roles")?;
        self.permissions.validate_map("redirects.permissions")?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "redirects"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_index_fallback() {
        let config = RedirectsConfig::default();
        assert_eq!(config.roles.default, "index");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_default_rejected() {
        let mut config = RedirectsConfig::default();
        config.roles.default = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_route_rejected() {
        let mut config = RedirectsConfig::default();
        config.roles.targets.insert("editor".to_string(), "  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_target_lookup() {
        let mut map = RedirectMap::default();
        map.targets.insert("editor".to_string(), "editor-home".to_string());
        assert_eq!(map.target("editor"), Some("editor-home"));
        assert_eq!(map.target("guest"), None);
    }
}
