//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use lexia_api::{AppState, build_app};
use lexia_core::config::AppConfig;
use lexia_core::error::AppError;
use lexia_core::result::AppResult;
use lexia_database::{DatabasePool, MemoryStore, Stores};
use lexia_entity::folder::Language;
use lexia_service::translate::{Detection, TranslationProvider};

/// Tests against `DATABASE_URL` share one database and truncate it on start.
static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

/// Translates by tagging text with the target language code and detects a
/// fixed answer, unless told to fail.
#[derive(Debug, Clone)]
pub struct FakeTranslator {
    /// Detection result returned for every text.
    pub detection: Vec<Detection>,
    /// When set, every call fails with this message.
    pub failure: Option<String>,
}

impl Default for FakeTranslator {
    fn default() -> Self {
        Self {
            detection: vec![Detection {
                language_code: "ka".to_string(),
                confidence: 0.93,
            }],
            failure: None,
        }
    }
}

#[async_trait]
impl TranslationProvider for FakeTranslator {
    async fn translate(&self, text: &str, _from: Language, to: Language) -> AppResult<Vec<String>> {
        if let Some(message) = &self.failure {
            return Err(AppError::external_service(message.clone()));
        }
        Ok(vec![format!("[{}] {text}", to.iso_code())])
    }

    async fn detect(&self, _text: &str) -> AppResult<Vec<Detection>> {
        if let Some(message) = &self.failure {
            return Err(AppError::external_service(message.clone()));
        }
        Ok(self.detection.clone())
    }
}

/// A migrated, empty PostgreSQL database held exclusively by one test.
pub struct TestDatabase {
    /// Pool over `DATABASE_URL`
    pub db: DatabasePool,
    _exclusive: MutexGuard<'static, ()>,
}

impl TestDatabase {
    /// Connect to `DATABASE_URL`, migrate and truncate. `None` when the
    /// variable is unset, so callers can skip.
    pub async fn connect() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let exclusive = DATABASE_LOCK.lock().await;

        let mut config = AppConfig::for_tests();
        config.database.url = url;
        config.database.min_connections = 0;
        config.database.max_connections = 8;

        let db = DatabasePool::connect_and_migrate(&config.database)
            .await
            .expect("Failed to prepare test database");
        Self::clean_database(db.pool()).await;

        Some(Self {
            db,
            _exclusive: exclusive,
        })
    }

    /// Repositories over the test pool
    pub fn stores(&self) -> Stores {
        self.db.stores()
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        sqlx::query("TRUNCATE TABLE words, folders, users")
            .execute(pool)
            .await
            .expect("Failed to truncate test tables");
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Set when the app runs over PostgreSQL
    pub database: Option<TestDatabase>,
}

impl TestApp {
    /// Create a new test application over empty in-memory stores
    pub fn new() -> Self {
        Self::with_translator(Arc::new(FakeTranslator::default()))
    }

    /// Same as [`TestApp::new`] with a custom translation provider
    pub fn with_translator(translator: Arc<dyn TranslationProvider>) -> Self {
        Self::build(MemoryStore::new().stores(), translator, None)
    }

    /// Create a test application over PostgreSQL, or `None` without `DATABASE_URL`
    pub async fn postgres() -> Option<Self> {
        let database = TestDatabase::connect().await?;
        Some(Self::build(
            database.stores(),
            Arc::new(FakeTranslator::default()),
            Some(database),
        ))
    }

    fn build(
        stores: Stores,
        translator: Arc<dyn TranslationProvider>,
        database: Option<TestDatabase>,
    ) -> Self {
        let mut config = AppConfig::for_tests();
        config.translate.retry_base_delay_ms = 1;

        let state = AppState::new(config, stores.folders, stores.words, stores.users, translator);

        Self {
            router: build_app(state),
            database,
        }
    }

    /// Sign up a user and return their access token
    pub async fn sign_up(&self, username: &str, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/sign-up",
                Some(json!({
                    "username": username,
                    "email": email,
                    "password": "Passw0rd!",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Sign-up failed: {:?}",
            response.body
        );
        response.body["accessToken"]
            .as_str()
            .expect("No accessToken in sign-up response")
            .to_string()
    }

    /// Create a folder and return its ID
    pub async fn create_folder(&self, token: &str, body: Value) -> String {
        let response = self.request("POST", "/api/v1/folders", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Folder creation failed: {:?}",
            response.body
        );
        response.body["id"].as_str().expect("No folder id").to_string()
    }

    /// Create a folder collection, optionally under `parent`
    pub async fn collection(&self, token: &str, name: &str, parent: Option<&str>) -> String {
        self.create_folder(
            token,
            json!({ "name": name, "type": "FOLDER_COLLECTION", "parentId": parent }),
        )
        .await
    }

    /// Create a Georgian to English word collection, optionally under `parent`
    pub async fn word_collection(&self, token: &str, name: &str, parent: Option<&str>) -> String {
        self.create_folder(
            token,
            json!({
                "name": name,
                "type": "WORD_COLLECTION",
                "languageFrom": "GEORGIAN",
                "languageTo": "ENGLISH",
                "parentId": parent,
            }),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
