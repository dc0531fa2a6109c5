//! Domain-specific configuration modules

pub mod catalog;
pub mod database;
pub mod logging;
pub mod redirects;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Rolegate configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RolegateConfig {
    /// Permission vocabulary and unknown-name policy
    #[serde(default)]
    pub catalog: catalog::CatalogConfig,

    /// Redirect targets consulted when an authorization check denies
    #[serde(default)]
    pub redirects: redirects::RedirectsConfig,

    /// Database connection configuration
    #[serde(default)]
    pub database: database::DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl RolegateConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.catalog.validate()?;
        self.redirects.validate()?;
        self.database.validate()?;
        self.logging.validate()?;

        // Cross-domain check: a permission redirect keyed on a name outside
        // the catalog can never match a held permission.
        self.redirects.validate_against_catalog(&self.catalog)?;

        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = RolegateConfig::default();
        serde_yaml::to_string(&config).unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
