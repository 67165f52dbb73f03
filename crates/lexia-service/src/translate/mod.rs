//! Text translation and language detection through an external provider.

pub mod google;
pub mod provider;
pub mod service;
pub mod variants;

pub use google::GoogleTranslateProvider;
pub use provider::{Detection, TranslationProvider};
pub use service::{DetectedLanguage, TranslateService, Translation, TranslationVariant};

/// Stable codes attached to translation errors.
pub mod codes {
    /// Input was blank after trimming.
    pub const EMPTY_TEXT: &str = "EMPTY_TEXT";
    /// Input exceeded the length limit.
    pub const TEXT_TOO_LONG: &str = "TEXT_TOO_LONG";
    /// Source and target languages are equal.
    pub const SAME_LANGUAGE: &str = "SAME_LANGUAGE";
    /// Provider failed after all retries.
    pub const TRANSLATION_FAILED: &str = "TRANSLATION_FAILED";
    /// Provider answered without any translation.
    pub const NO_RESULTS: &str = "NO_RESULTS";
    /// Provider could not detect a language.
    pub const NO_DETECTION: &str = "NO_DETECTION";
    /// Provider detected a language outside the supported set.
    pub const UNSUPPORTED_DETECTED_LANGUAGE: &str = "UNSUPPORTED_DETECTED_LANGUAGE";
    /// Provider credentials are missing or rejected.
    pub const CREDENTIALS_ERROR: &str = "CREDENTIALS_ERROR";
}
