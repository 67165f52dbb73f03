//! The translation provider seam.

use async_trait::async_trait;

use lexia_core::result::AppResult;
use lexia_entity::folder::Language;

/// One language guess from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Provider language code (e.g. `"ka"`, `"zh-CN"`).
    pub language_code: String,
    /// Provider confidence in `[0, 1]`.
    pub confidence: f32,
}

/// A machine translation backend.
///
/// Failures are `ExternalService` errors whose message carries the
/// transport or HTTP detail, which the service inspects to decide on retries.
#[async_trait]
pub trait TranslationProvider: Send + Sync + std::fmt::Debug {
    /// Translate `text`, returning candidate translations best first.
    async fn translate(&self, text: &str, from: Language, to: Language) -> AppResult<Vec<String>>;

    /// Detect the language of `text`, best guess first.
    async fn detect(&self, text: &str) -> AppResult<Vec<Detection>>;
}
