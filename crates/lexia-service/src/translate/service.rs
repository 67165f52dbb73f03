//! Translation use cases: input checks, retries, and variant generation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use lexia_core::config::TranslateConfig;
use lexia_core::error::AppError;
use lexia_core::result::AppResult;
use lexia_entity::folder::Language;

use super::codes;
use super::provider::TranslationProvider;
use super::variants;
use crate::context::RequestContext;

/// Longest accepted input, in characters.
pub const MAX_TEXT_LEN: usize = 5000;

/// Provider error fragments that indicate a transient failure.
const RETRYABLE_FRAGMENTS: [&str; 11] = [
    "timeout",
    "connection",
    "network",
    "rate limit",
    "quota",
    "temporary",
    "unavailable",
    "internal error",
    "503",
    "502",
    "429",
];

/// One candidate translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationVariant {
    /// Translated text.
    pub text: String,
    /// Heuristic confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Result of a translation request.
#[derive(Debug, Clone)]
pub struct Translation {
    /// The (trimmed) input.
    pub original_text: String,
    /// Source language.
    pub language_from: Language,
    /// Target language.
    pub language_to: Language,
    /// Primary translation first, then up to three variants.
    pub variants: Vec<TranslationVariant>,
}

/// Result of language detection.
#[derive(Debug, Clone)]
pub struct DetectedLanguage {
    /// The detected language.
    pub language: Language,
    /// Provider confidence.
    pub confidence: f32,
    /// The (trimmed) input.
    pub text: String,
}

/// Translates text and detects languages through a [`TranslationProvider`].
#[derive(Debug, Clone)]
pub struct TranslateService {
    provider: Arc<dyn TranslationProvider>,
    max_attempts: u32,
    base_delay: Duration,
}

/// Whether a provider error looks transient.
pub fn is_retryable(err: &AppError) -> bool {
    if err.code == Some(codes::CREDENTIALS_ERROR) {
        return false;
    }
    let message = err.message.to_lowercase();
    RETRYABLE_FRAGMENTS.iter().any(|f| message.contains(f))
}

fn check_text(text: &str) -> AppResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::validation("Text cannot be empty").with_code(codes::EMPTY_TEXT));
    }
    let length = text.chars().count();
    if length > MAX_TEXT_LEN {
        return Err(AppError::validation(format!(
            "Text exceeds maximum length of {MAX_TEXT_LEN} characters (got {length})"
        ))
        .with_code(codes::TEXT_TOO_LONG));
    }
    Ok(text.to_string())
}

impl TranslateService {
    /// Creates a new translation service.
    pub fn new(provider: Arc<dyn TranslationProvider>, config: &TranslateConfig) -> Self {
        Self {
            provider,
            max_attempts: config.max_retries.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// The languages translation and detection understand.
    pub fn supported_languages(&self) -> Vec<Language> {
        Language::ALL.to_vec()
    }

    /// Runs `call` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Waits `base_delay * 2^attempt` between attempts.
    async fn with_retry<T, F, Fut>(&self, ctx: &RequestContext, what: &str, mut call: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut last_error = None;
        for attempt in 0..self.max_attempts {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.code == Some(codes::CREDENTIALS_ERROR) => return Err(e),
                Err(e) => {
                    let retry = is_retryable(&e);
                    warn!(attempt = attempt + 1, retryable = retry, error = %e, "{what} attempt failed");
                    last_error = Some(e);
                    if !retry {
                        break;
                    }
                    if attempt + 1 < self.max_attempts {
                        let delay = self.base_delay * 2u32.saturating_pow(attempt);
                        tokio::select! {
                            _ = ctx.cancellation.cancelled() => {
                                return Err(AppError::cancelled(format!("{what} was cancelled")));
                            }
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                }
            }
        }

        let detail = last_error.map(|e| e.message).unwrap_or_default();
        Err(AppError::external_service(format!(
            "{what} failed after {} attempts: {detail}",
            self.max_attempts
        ))
        .with_code(codes::TRANSLATION_FAILED))
    }

    /// Translates `text` and decorates the result with alternative variants.
    pub async fn translate(
        &self,
        ctx: &RequestContext,
        text: &str,
        from: Language,
        to: Language,
    ) -> AppResult<Translation> {
        let text = check_text(text)?;
        if from == to {
            return Err(
                AppError::validation("Source and target languages cannot be the same")
                    .with_code(codes::SAME_LANGUAGE),
            );
        }

        let results = self
            .with_retry(ctx, "Translation", || self.provider.translate(&text, from, to))
            .await?;
        let primary = results.into_iter().next().ok_or_else(|| {
            AppError::external_service("Translation provider returned no results")
                .with_code(codes::NO_RESULTS)
        })?;

        let mut translations = vec![TranslationVariant {
            text: primary.clone(),
            confidence: variants::PRIMARY_CONFIDENCE,
        }];
        translations.extend(self.extra_variants(&text, from, to, &primary).await);

        info!(
            user_id = %ctx.user_id,
            from = %from,
            to = %to,
            variants = translations.len(),
            "Text translated"
        );

        Ok(Translation {
            original_text: text,
            language_from: from,
            language_to: to,
            variants: translations,
        })
    }

    /// Best-effort variants; provider failures here are logged and skipped.
    async fn extra_variants(
        &self,
        original: &str,
        from: Language,
        to: Language,
        primary: &str,
    ) -> Vec<TranslationVariant> {
        let mut extra = Vec::new();

        match self.provider.translate(primary, to, from).await {
            Ok(back) => {
                let back = back.into_iter().next().unwrap_or_default();
                let confidence = variants::translation_confidence(original, &back);
                if confidence < variants::ALTERNATIVES_THRESHOLD {
                    extra.extend(self.alternatives(original, from, to, primary).await);
                }
            }
            Err(e) => warn!(error = %e, "Back-translation failed"),
        }

        if let Some(text) = variants::formal_variant(primary, to) {
            extra.push(TranslationVariant {
                text,
                confidence: variants::FORMAL_CONFIDENCE,
            });
        }
        if let Some(text) = variants::regional_variant(primary, to) {
            extra.push(TranslationVariant {
                text,
                confidence: variants::REGIONAL_CONFIDENCE,
            });
        }
        if let Some(text) = variants::simplified_variant(original, primary) {
            extra.push(TranslationVariant {
                text,
                confidence: variants::SIMPLIFIED_CONFIDENCE,
            });
        }

        extra.truncate(variants::MAX_EXTRA_VARIANTS);
        extra
    }

    /// One pivot translation and one re-request, each only if it differs from `primary`.
    async fn alternatives(
        &self,
        original: &str,
        from: Language,
        to: Language,
        primary: &str,
    ) -> Vec<TranslationVariant> {
        let mut found = Vec::new();

        for pivot in variants::PIVOT_LANGUAGES {
            if pivot == from || pivot == to {
                continue;
            }
            let via = match self.provider.translate(original, from, pivot).await {
                Ok(results) => match results.into_iter().next() {
                    Some(via) => via,
                    None => continue,
                },
                Err(e) => {
                    warn!(pivot = %pivot, error = %e, "Pivot translation failed");
                    continue;
                }
            };
            let Ok(Some(candidate)) = self
                .provider
                .translate(&via, pivot, to)
                .await
                .map(|r| r.into_iter().next())
            else {
                continue;
            };
            if !variants::is_text_similar(&candidate, primary) {
                found.push(TranslationVariant {
                    text: candidate,
                    confidence: variants::PIVOT_CONFIDENCE,
                });
                break;
            }
        }

        for _ in 0..2 {
            let Ok(Some(candidate)) = self
                .provider
                .translate(original, from, to)
                .await
                .map(|r| r.into_iter().next())
            else {
                continue;
            };
            if !variants::is_text_similar(&candidate, primary) {
                found.push(TranslationVariant {
                    text: candidate,
                    confidence: variants::REREQUEST_CONFIDENCE,
                });
                break;
            }
        }

        found
    }

    /// Detects the language of `text`.
    pub async fn detect(&self, ctx: &RequestContext, text: &str) -> AppResult<DetectedLanguage> {
        let text = check_text(text)?;

        let detections = self
            .with_retry(ctx, "Language detection", || self.provider.detect(&text))
            .await?;
        let best = detections.into_iter().next().ok_or_else(|| {
            AppError::external_service("No language detected").with_code(codes::NO_DETECTION)
        })?;
        let language = Language::from_iso_code(&best.language_code).ok_or_else(|| {
            AppError::validation(format!(
                "Detected language '{}' is not supported",
                best.language_code
            ))
            .with_code(codes::UNSUPPORTED_DETECTED_LANGUAGE)
        })?;

        info!(user_id = %ctx.user_id, language = %language, "Language detected");
        Ok(DetectedLanguage {
            language,
            confidence: best.confidence,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use lexia_core::error::ErrorKind;
    use lexia_core::types::UserId;

    use super::*;
    use crate::translate::provider::Detection;

    /// Prefixes translations with the target code; fails the first N calls.
    ///
    /// A lossy provider also glues words together, so back-translations
    /// never match the original and alternatives get requested.
    #[derive(Debug, Default)]
    struct TaggingProvider {
        lossy: bool,
        failures_left: AtomicUsize,
        failure: Mutex<String>,
        calls: AtomicUsize,
        detection: Mutex<Vec<Detection>>,
    }

    impl TaggingProvider {
        fn failing(times: usize, message: &str) -> Self {
            Self {
                failures_left: AtomicUsize::new(times),
                failure: Mutex::new(message.to_string()),
                ..Self::default()
            }
        }

        fn lossy() -> Self {
            Self {
                lossy: true,
                ..Self::default()
            }
        }

        fn fail_if_scheduled(&self) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                let message = self.failure.lock().unwrap().clone();
                return Err(AppError::external_service(message));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TranslationProvider for TaggingProvider {
        async fn translate(&self, text: &str, _from: Language, to: Language) -> AppResult<Vec<String>> {
            self.fail_if_scheduled()?;
            if self.lossy {
                return Ok(vec![format!("{}:{}", to.iso_code(), text.replace(' ', "_"))]);
            }
            Ok(vec![format!("[{}] {text}", to.iso_code())])
        }

        async fn detect(&self, _text: &str) -> AppResult<Vec<Detection>> {
            self.fail_if_scheduled()?;
            Ok(self.detection.lock().unwrap().clone())
        }
    }

    fn service(provider: Arc<TaggingProvider>) -> TranslateService {
        TranslateService::new(provider, &TranslateConfig::default())
    }

    fn ctx() -> RequestContext {
        RequestContext::new(UserId::new(), "t@example.com")
    }

    #[tokio::test]
    async fn test_faithful_translation_skips_alternatives() {
        let provider = Arc::new(TaggingProvider::default());
        let result = service(provider)
            .translate(&ctx(), "  hello world ", Language::Georgian, Language::English)
            .await
            .unwrap();

        assert_eq!(result.original_text, "hello world");
        assert_eq!(result.variants[0].text, "[en] hello world");
        assert_eq!(result.variants[0].confidence, 0.95);
        assert_eq!(
            result.variants[1..].to_vec(),
            vec![TranslationVariant {
                text: "[en] hello world (UK)".into(),
                confidence: 0.80,
            }]
        );
    }

    #[tokio::test]
    async fn test_lossy_translation_adds_pivot_variant() {
        let provider = Arc::new(TaggingProvider::lossy());
        let result = service(provider)
            .translate(&ctx(), "hello world", Language::Georgian, Language::English)
            .await
            .unwrap();

        let texts: Vec<_> = result
            .variants
            .iter()
            .map(|v| (v.text.as_str(), v.confidence))
            .collect();
        assert_eq!(
            texts,
            vec![
                ("en:hello_world", 0.95),
                ("en:fr:hello_world", 0.75),
                ("en:hello_world (UK)", 0.80),
            ]
        );
    }

    #[tokio::test]
    async fn test_extra_variants_capped() {
        let provider = Arc::new(TaggingProvider::lossy());
        let run_on = vec!["palabra"; 30].join(" ") + " " + &vec!["mas"; 5].join(" ");
        let result = service(provider)
            .translate(&ctx(), &run_on, Language::English, Language::Spanish)
            .await
            .unwrap();

        assert_eq!(result.variants.len(), 1 + variants::MAX_EXTRA_VARIANTS);
        assert!(result.variants[1].text.starts_with("es:fr:"));
        assert!(result.variants[2].text.ends_with("(formal)"));
        assert!(result.variants[3].text.ends_with("(MX)"));
        assert!(!result.variants.iter().any(|v| v.text.ends_with("(simplified)")));
    }

    #[tokio::test]
    async fn test_input_errors() {
        let s = service(Arc::new(TaggingProvider::default()));
        let err = s.translate(&ctx(), "   ", Language::English, Language::French).await.unwrap_err();
        assert_eq!(err.code, Some(codes::EMPTY_TEXT));
        assert!(err.is(ErrorKind::Validation));

        let long = "a".repeat(MAX_TEXT_LEN + 1);
        let err = s.translate(&ctx(), &long, Language::English, Language::French).await.unwrap_err();
        assert_eq!(err.code, Some(codes::TEXT_TOO_LONG));

        let err = s.translate(&ctx(), "hi", Language::English, Language::English).await.unwrap_err();
        assert_eq!(err.code, Some(codes::SAME_LANGUAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let provider = Arc::new(TaggingProvider::failing(2, "Service Unavailable (503)"));
        let result = service(provider.clone())
            .translate(&ctx(), "hi", Language::English, Language::German)
            .await
            .unwrap();
        assert_eq!(result.variants[0].text, "[de] hi");
        assert!(provider.calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_exhausted() {
        let provider = Arc::new(TaggingProvider::failing(10, "request timeout"));
        let err = service(provider.clone())
            .translate(&ctx(), "hi", Language::English, Language::German)
            .await
            .unwrap_err();
        assert_eq!(err.code, Some(codes::TRANSLATION_FAILED));
        assert!(err.is(ErrorKind::ExternalService));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_not_retried() {
        let provider = Arc::new(TaggingProvider::failing(10, "invalid argument"));
        let err = service(provider.clone())
            .translate(&ctx(), "hi", Language::English, Language::German)
            .await
            .unwrap_err();
        assert_eq!(err.code, Some(codes::TRANSLATION_FAILED));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_detection_mapping() {
        let provider = Arc::new(TaggingProvider::default());
        *provider.detection.lock().unwrap() = vec![Detection {
            language_code: "ka".into(),
            confidence: 0.9,
        }];
        let s = service(provider.clone());
        let detected = s.detect(&ctx(), "გამარჯობა").await.unwrap();
        assert_eq!(detected.language, Language::Georgian);
        assert_eq!(detected.text, "გამარჯობა");

        *provider.detection.lock().unwrap() = vec![Detection {
            language_code: "pt".into(),
            confidence: 0.9,
        }];
        let err = s.detect(&ctx(), "olá").await.unwrap_err();
        assert_eq!(err.code, Some(codes::UNSUPPORTED_DETECTED_LANGUAGE));

        provider.detection.lock().unwrap().clear();
        let err = s.detect(&ctx(), "???").await.unwrap_err();
        assert_eq!(err.code, Some(codes::NO_DETECTION));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(is_retryable(&AppError::external_service("HTTP 429 Too Many Requests")));
        assert!(is_retryable(&AppError::external_service("Rate Limit exceeded")));
        assert!(!is_retryable(&AppError::external_service("400 bad request")));
        assert!(!is_retryable(
            &AppError::external_service("connection").with_code(codes::CREDENTIALS_ERROR)
        ));
    }
}
