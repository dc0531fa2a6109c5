//! Database connection management

use rolegate_config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::migrations::Migrator;

/// Database connection wrapper with configuration
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
    config: DatabaseConfig,
}

/// Storage-level errors raised outside the repository traits
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DatabaseConnection {
    /// Create a new database connection with configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self, StorageError> {
        info!("Connecting to database: {}", config.url);

        Self::ensure_sqlite_file_exists(&config.url)?;

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let connection = Database::connect(opts).await?;

        debug!(
            "Database connection established with {} max connections",
            config.max_connections
        );

        Ok(Self { connection, config })
    }

    /// Run pending migrations
    pub async fn migrate(&self) -> Result<(), StorageError> {
        Migrator::up(&self.connection, None)
            .await
            .map_err(|e| StorageError::MigrationError(e.to_string()))
    }

    /// Access the underlying SeaORM connection
    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    /// The configuration this connection was built from
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Ensure the SQLite database file and its directory exist for
    /// file-based databases. In-memory databases need no setup.
    fn ensure_sqlite_file_exists(database_url: &str) -> Result<(), StorageError> {
        if !database_url.starts_with("sqlite:") || database_url.contains(":memory:") {
            return Ok(());
        }

        let file_path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .ok_or_else(|| StorageError::ConfigError(format!("Invalid SQLite URL format: {}", database_url)))?;

        let path = std::path::Path::new(file_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::ConfigError(format!("Failed to create database directory: {}", e)))?;
            }
        }

        if !path.exists() {
            std::fs::File::create(path)
                .map_err(|e| StorageError::ConfigError(format!("Failed to create database file: {}", e)))?;
            debug!("Created SQLite database file at {}", file_path);
        }

        Ok(())
    }
}
