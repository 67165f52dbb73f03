//! # lexia-auth
//!
//! Authentication primitives for Lexia.
//!
//! ## Modules
//!
//! - `jwt`: HS256 access token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
