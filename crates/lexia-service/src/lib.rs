//! # lexia-service
//!
//! Business logic for Lexia. The folder tree manager owns the shape of each
//! user's folder forest; the word, user, auth and translation services build
//! on it.
//!
//! Services take their dependencies at construction time as `Arc` handles to
//! the store traits, so the same code runs against PostgreSQL or the
//! in-memory store.

pub mod auth;
pub mod context;
pub mod folder;
pub mod translate;
pub mod user;
pub mod word;

pub use auth::{AuthPayload, AuthService};
pub use context::RequestContext;
pub use folder::{CreateFolderRequest, FolderDetail, FolderService, UpdateFolderRequest};
pub use translate::{GoogleTranslateProvider, TranslateService, TranslationProvider};
pub use user::{NewUser, UserService};
pub use word::{CreateWordRequest, DuplicateCheck, UpdateWordRequest, WordService, WordWithPath};
