//! Core type definitions used across the Lexia workspace.

pub mod id;

pub use id::*;
