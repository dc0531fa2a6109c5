//! Operator CLI for Rolegate
//!
//! Loads configuration, opens the database, runs pending migrations and
//! dispatches to the subcommand handlers. All errors surface here as
//! human-readable messages with a non-zero exit code.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rolegate_config::{ConfigLoader, LogFormat, RolegateConfig};
use rolegate_rbac::{AssignmentService, RolesFacade};
use rolegate_storage::{DatabaseConnection, RepositoryFactory};

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};
use commands::CommandContext;

/// Load configuration from file or fall back to environment defaults
fn load_config(config_path: Option<&PathBuf>) -> Result<RolegateConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => {
            if path.exists() {
                loader
                    .from_file(path)
                    .context(format!("Failed to load configuration from {:?}", path))
            } else {
                // Runs before the tracing subscriber is installed
                eprintln!("Configuration file not found: {:?}. Using defaults.", path);
                loader
                    .from_env()
                    .context("Failed to load configuration from environment")
            }
        }
        None => loader
            .from_env()
            .context("Failed to load configuration from environment"),
    }
}

/// Initialize tracing; a `--log-level` flag beats the configured level.
fn init_logging(config: &RolegateConfig, override_level: Option<&str>) {
    let directive = override_level.unwrap_or_else(|| config.logging.level.as_filter());
    let env_filter = EnvFilter::try_new(directive).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', using 'info'", directive);
        EnvFilter::new("info")
    });

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Open the database, apply migrations and wire the service layer
async fn build_context(config: &RolegateConfig) -> Result<CommandContext> {
    let db = DatabaseConnection::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    db.migrate().await.context("Failed to run database migrations")?;
    info!(url = %config.database.url, "database ready");

    let repos = RepositoryFactory::new(db);
    let service = AssignmentService::new(
        repos.role_repository(),
        repos.assignment_repository(),
        repos.matrix_repository(),
        repos.user_directory(),
        config.catalog.clone(),
    );
    let facade = RolesFacade::new(
        repos.role_repository(),
        repos.assignment_repository(),
        repos.matrix_repository(),
        config.catalog.clone(),
    );

    Ok(CommandContext { service, facade })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands run without a database.
    if let Commands::Config { config_cmd } = &cli.command {
        return match config_cmd {
            ConfigCommands::Generate { output } => commands::config::generate(output.clone()),
            ConfigCommands::Validate { file } => commands::config::validate(file),
        };
    }

    let config = load_config(cli.config.as_ref())?;
    init_logging(&config, cli.log_level.as_deref());

    let ctx = build_context(&config).await?;

    match cli.command {
        Commands::Permissions {
            userid,
            permissions,
            append,
            list,
        } => commands::permissions::execute(&ctx, userid, permissions, append, list).await,
        Commands::Roles {
            role_name,
            permissions,
            append,
            list,
            describe,
        } => commands::roles::execute(&ctx, role_name, permissions, append, list, describe).await,
        Commands::UserRole {
            userid,
            roles,
            append,
            list,
        } => commands::user_role::execute(&ctx, userid, roles, append, list).await,
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
