//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use lexia_core::config::AppConfig;
use lexia_core::error::AppError;
use lexia_entity::user::User;
use lexia_service::user::NewUser;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Create a user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        username: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect(config).await?;

    match &args.command {
        UserCommand::List => {
            let users = services.users.list_users().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create {
            email,
            username,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let user = services
                .users
                .register(NewUser {
                    username: username.clone(),
                    email: email.clone(),
                    password,
                })
                .await?;

            output::print_success(&format!("User '{}' created", user.email));
            output::print_item(&UserRow::from(&user), format);
        }
    }

    Ok(())
}
