//! CLI command definitions and dispatch.

pub mod folder;
pub mod migrate;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use lexia_auth::password::{PasswordHasher, PasswordValidator};
use lexia_core::config::AppConfig;
use lexia_core::error::AppError;
use lexia_database::DatabasePool;
use lexia_service::folder::FolderService;
use lexia_service::user::UserService;

use crate::output::OutputFormat;

/// Lexia vocabulary backend administration
#[derive(Debug, Parser)]
#[command(name = "lexia-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load (`config/{env}.toml`)
    #[arg(long, env = "LEXIA_ENV", default_value = "development")]
    pub config_env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Folder inspection
    Folder(folder::FolderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config_env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &config, self.format).await,
        }
    }
}

/// User and folder services over the configured PostgreSQL database.
pub struct Services {
    pub users: UserService,
    pub folders: FolderService,
}

/// Helper: connect to the database and build the services commands need
pub async fn connect(config: &AppConfig) -> Result<Services, AppError> {
    let stores = DatabasePool::connect(&config.database).await?.stores();

    let users = UserService::new(
        stores.users,
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
    );
    let folders = FolderService::new(stores.folders, stores.words, config.folders.clone());

    Ok(Services { users, folders })
}
