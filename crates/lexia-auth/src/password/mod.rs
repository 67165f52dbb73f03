//! Password hashing and policy enforcement.

pub mod hasher;
pub mod validator;

pub use hasher::{PasswordHasher, invalid_credentials};
pub use validator::PasswordValidator;
