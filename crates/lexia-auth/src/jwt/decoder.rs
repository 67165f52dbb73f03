//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use lexia_core::config::AuthConfig;
use lexia_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Every failure is an `Authentication` error with code `INVALID_TOKEN`.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                let message = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        "Token has expired".to_string()
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        "Invalid token format".to_string()
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        "Invalid token signature".to_string()
                    }
                    _ => format!("Token validation failed: {e}"),
                };
                AppError::authentication(message).with_code("INVALID_TOKEN")
            })?;

        Ok(token_data.claims)
    }
}
