//! Vocabulary word entities.

pub mod model;

pub use model::{CreateWord, UpdateWord, Word};
