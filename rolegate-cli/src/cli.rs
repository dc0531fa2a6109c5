//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Manage roles, permissions and their assignments", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Grant direct permissions to a user, or list the catalog
    Permissions {
        /// Target user id
        #[arg(long, value_name = "ID")]
        userid: Option<i32>,

        /// Comma-separated permission names
        #[arg(long, value_name = "NAMES")]
        permissions: Option<String>,

        /// Add to the existing grants instead of replacing them
        #[arg(long)]
        append: bool,

        /// Print the permission catalog and exit
        #[arg(long)]
        list: bool,
    },

    /// Set a role's enabled permissions, or inspect roles
    Roles {
        /// Role name (created on first use)
        #[arg(long, value_name = "NAME")]
        role_name: Option<String>,

        /// Comma-separated permission names
        #[arg(long, value_name = "NAMES")]
        permissions: Option<String>,

        /// Add to the role's enabled permissions instead of replacing them
        #[arg(long)]
        append: bool,

        /// Print all roles and exit
        #[arg(long)]
        list: bool,

        /// Print the role's enabled permissions and exit
        #[arg(long)]
        describe: bool,
    },

    /// Assign roles to a user, or list a user's roles
    UserRole {
        /// Target user id
        #[arg(long, value_name = "ID")]
        userid: Option<i32>,

        /// Comma-separated role names
        #[arg(long, value_name = "NAMES")]
        roles: Option<String>,

        /// Add to the user's roles instead of replacing them
        #[arg(long)]
        append: bool,

        /// Print the user's roles and exit
        #[arg(long)]
        list: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a sample configuration file
    Generate {
        /// Write to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
}
