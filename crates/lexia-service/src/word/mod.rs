//! Vocabulary words stored in word collections.

pub mod service;

pub use service::{
    CreateWordRequest, DuplicateCheck, UpdateWordRequest, WordService, WordWithPath,
};
