//! Google Cloud Translation (v2 basic) over REST.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lexia_core::config::TranslateConfig;
use lexia_core::error::{AppError, ErrorKind};
use lexia_core::result::AppResult;
use lexia_entity::folder::Language;

use super::codes;
use super::provider::{Detection, TranslationProvider};

/// Calls the Google Translate v2 REST API with an API key.
#[derive(Debug, Clone)]
pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    project_id: String,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: [&'a str; 1],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Serialize)]
struct DetectBody<'a> {
    q: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationsData {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct DetectionsData {
    #[serde(default)]
    detections: Vec<Vec<RawDetection>>,
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    language: String,
    #[serde(default)]
    confidence: f32,
}

fn credentials_error() -> AppError {
    AppError::external_service("Translation provider credentials are not configured")
        .with_code(codes::CREDENTIALS_ERROR)
}

fn transport_error(e: reqwest::Error) -> AppError {
    let hint = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connection error"
    } else {
        "network error"
    };
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Translation request failed ({hint}): {e}"),
        e,
    )
}

impl GoogleTranslateProvider {
    /// Builds a provider from configuration.
    pub fn new(config: &TranslateConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build translation HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            project_id: config.project_id.trim().to_string(),
        })
    }

    fn url(&self, suffix: &str) -> AppResult<Url> {
        if self.api_key.is_empty() {
            return Err(credentials_error());
        }
        Url::parse_with_params(
            &format!("{}{}", self.endpoint, suffix),
            &[("key", self.api_key.as_str())],
        )
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                "Invalid translation endpoint URL",
                e,
            )
        })
    }

    async fn post<B: Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        suffix: &str,
        body: &B,
    ) -> AppResult<T> {
        let mut request = self.client.post(self.url(suffix)?).json(body);
        if !self.project_id.is_empty() {
            request = request.header("x-goog-user-project", &self.project_id);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(credentials_error());
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Translation provider returned {}: {}",
                status.as_u16(),
                detail.chars().take(300).collect::<String>()
            )));
        }

        let envelope: Envelope<T> = response.json().await.map_err(transport_error)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn translate(&self, text: &str, from: Language, to: Language) -> AppResult<Vec<String>> {
        debug!(from = %from, to = %to, chars = text.chars().count(), "Calling translation provider");
        let data: TranslationsData = self
            .post(
                "",
                &TranslateBody {
                    q: [text],
                    source: from.iso_code(),
                    target: to.iso_code(),
                    format: "text",
                },
            )
            .await?;
        Ok(data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }

    async fn detect(&self, text: &str) -> AppResult<Vec<Detection>> {
        debug!(chars = text.chars().count(), "Calling language detection");
        let data: DetectionsData = self.post("/detect", &DetectBody { q: [text] }).await?;
        Ok(data
            .detections
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|d| Detection {
                language_code: d.language,
                confidence: d.confidence,
            })
            .collect())
    }
}
