//! Route handlers organized by domain.

pub mod auth;
pub mod folder;
pub mod health;
pub mod translate;
pub mod user;
pub mod word;
