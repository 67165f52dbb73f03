//! Database migration management commands.

use clap::{Args, Subcommand};

use lexia_core::config::AppConfig;
use lexia_core::error::AppError;
use lexia_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            DatabasePool::connect_and_migrate(&config.database).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
