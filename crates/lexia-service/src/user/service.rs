//! User account operations: registration, profile, listing.

use std::sync::Arc;

use tracing::info;

use lexia_auth::password::{PasswordHasher, PasswordValidator};
use lexia_core::error::AppError;
use lexia_core::result::AppResult;
use lexia_core::types::UserId;
use lexia_database::store::UserStore;
use lexia_entity::user::{CreateUser, User};

use crate::context::RequestContext;

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 50;

/// Manages user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

/// Plain-text registration data.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plain-text password (hashed before storage).
    pub password: String,
}

/// Checks length and the `[A-Za-z0-9_-]` alphabet.
pub fn validate_username(username: &str) -> AppResult<String> {
    let username = username.trim();
    let length = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::validation(
            "Username may only contain letters, digits, underscores and hyphens",
        ));
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(email.to_string())
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Validates, hashes and stores a new user.
    pub async fn register(&self, new_user: NewUser) -> AppResult<User> {
        let username = validate_username(&new_user.username)?;
        let email = normalize_email(&new_user.email)?;
        self.validator.validate(&new_user.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already exists").with_code("EMAIL_ALREADY_EXISTS"));
        }

        let password_hash = self.hasher.hash_password(&new_user.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Finds a user by email, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email.trim()).await
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found").with_code("USER_NOT_FOUND"))
    }

    /// The authenticated user's profile.
    pub async fn get_current(&self, ctx: &RequestContext) -> AppResult<User> {
        self.get_user(ctx.user_id).await
    }

    /// Changes the authenticated user's username.
    pub async fn rename(&self, ctx: &RequestContext, username: &str) -> AppResult<User> {
        let username = validate_username(username)?;
        let user = self.users.rename(ctx.user_id, &username).await?;
        info!(user_id = %user.id, "User renamed");
        Ok(user)
    }

    /// All users, oldest first.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }
}
