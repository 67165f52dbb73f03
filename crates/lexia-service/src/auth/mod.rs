//! Sign-up and sign-in.

pub mod service;

pub use service::{AuthPayload, AuthService};
