//! Translation provider configuration.

use serde::{Deserialize, Serialize};

/// Google Translate (v2 REST) client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Base URL of the translation API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: String,
    /// Google Cloud project billed for the requests (`x-goog-user-project`).
    #[serde(default)]
    pub project_id: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Attempts per provider call before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff before the second attempt; doubles for each further attempt.
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
}

impl TranslateConfig {
    /// Whether credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            project_id: String::new(),
            request_timeout_seconds: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
        }
    }
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    100
}
