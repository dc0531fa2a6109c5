//! Domain-driven configuration management for Rolegate
//!
//! This crate provides modular configuration split by functional domains,
//! with validation, defaults, and environment variable support. All
//! validation happens at load time so misconfiguration (an empty catalog, a
//! redirect map without a default, a redirect keyed on an unknown
//! permission) fails at startup rather than at a denied request.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    catalog::{CatalogConfig, UnknownNamePolicy},
    database::DatabaseConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    redirects::{RedirectMap, RedirectsConfig},
    RolegateConfig,
};
