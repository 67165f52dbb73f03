//! PostgreSQL implementations of the store traits.

pub mod folder;
pub mod user;
pub mod word;

pub use folder::{FolderRepository, PgFolderTransaction};
pub use user::UserRepository;
pub use word::WordRepository;
