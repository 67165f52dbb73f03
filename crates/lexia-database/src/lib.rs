//! # lexia-database
//!
//! Persistence for Lexia: the store traits the service layer is written
//! against, their PostgreSQL implementations, and an in-memory backend used
//! by tests and local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{FolderStore, FolderTransaction, Stores, UserStore, WordStore};
