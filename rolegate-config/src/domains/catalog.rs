//! Permission catalog configuration
//!
//! The catalog is the ordered vocabulary of valid permission names. It is
//! read once at process start and immutable afterwards; every mutation path
//! checks candidate names against it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Permission catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Ordered permission vocabulary
    pub permissions: Vec<String>,

    /// What to do with permission names outside the vocabulary
    #[serde(default)]
    pub unknown_names: UnknownNamePolicy,
}

/// Policy for permission names that are not part of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownNamePolicy {
    /// Silently filter unknown names out of the effective set
    #[default]
    Drop,
    /// Fail the operation before any mutation
    Reject,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            permissions: vec!["manage permissions".to_string()],
            unknown_names: UnknownNamePolicy::Drop,
        }
    }
}

impl CatalogConfig {
    /// Ordered permission vocabulary
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Whether a name is part of the vocabulary
    pub fn is_valid(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }

    /// Split candidate names into catalog members and unknowns, preserving
    /// input order and dropping duplicates among the kept names.
    pub fn partition_known(&self, names: &[String]) -> (Vec<String>, Vec<String>) {
        let mut seen = HashSet::new();
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for name in names {
            if self.is_valid(name) {
                if seen.insert(name.clone()) {
                    known.push(name.clone());
                }
            } else {
                unknown.push(name.clone());
            }
        }
        (known, unknown)
    }
}

impl FromStr for UnknownNamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(UnknownNamePolicy::Drop),
            "reject" | "strict" => Ok(UnknownNamePolicy::Reject),
            _ => Err(format!("Invalid unknown-name policy: {}", s)),
        }
    }
}

impl Validatable for CatalogConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.permissions.is_empty() {
            return Err(self.validation_error("permission catalog cannot be empty"));
        }

        let mut seen = HashSet::new();
        for permission in &self.permissions {
            if permission.trim().is_empty() {
                return Err(self.validation_error("permission names cannot be empty"));
            }
            if !seen.insert(permission.as_str()) {
                return Err(self.validation_error(format!("duplicate permission in catalog: '{}'", permission)));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "catalog"
    }
}
