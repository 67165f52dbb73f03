//! # lexia-entity
//!
//! Domain entity models for Lexia. Every struct in this crate represents a
//! database table row or a domain value object. Row types derive
//! `sqlx::FromRow`; everything derives `Debug`, `Clone` and serde.

pub mod folder;
pub mod user;
pub mod word;
