//! Email/password authentication issuing access tokens.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use lexia_auth::jwt::JwtEncoder;
use lexia_auth::password::{PasswordHasher, invalid_credentials};
use lexia_core::result::AppResult;
use lexia_entity::user::User;

use crate::user::{NewUser, UserService};

/// A freshly issued token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    /// Signed access token.
    pub access_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Registers users and exchanges credentials for tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserService,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(users: UserService, hasher: Arc<PasswordHasher>, encoder: Arc<JwtEncoder>) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    fn issue(&self, user: User) -> AppResult<AuthPayload> {
        let (access_token, expires_at) = self.encoder.generate_access_token(user.id, &user.email)?;
        Ok(AuthPayload {
            access_token,
            expires_at,
            user,
        })
    }

    /// Registers a new account and signs it in.
    pub async fn sign_up(&self, new_user: NewUser) -> AppResult<AuthPayload> {
        let user = self.users.register(new_user).await?;
        self.issue(user)
    }

    /// Exchanges email and password for an access token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthPayload> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Sign-in attempt for unknown email");
            return Err(invalid_credentials());
        };

        if let Err(e) = self.hasher.check_credentials(password, &user.password_hash) {
            warn!(user_id = %user.id, "Sign-in with wrong password");
            return Err(e);
        }

        info!(user_id = %user.id, "User signed in");
        self.issue(user)
    }
}
