//! Integration tests for translation and language detection.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use lexia_core::config::TranslateConfig;
use lexia_service::translate::GoogleTranslateProvider;

#[tokio::test]
async fn test_translate_returns_primary_first() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/translate",
            Some(json!({ "text": " good morning ", "languageFrom": "GEORGIAN", "languageTo": "ENGLISH" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["originalText"], "good morning");
    assert_eq!(response.body["languageFrom"], "GEORGIAN");
    let translations = response.body["translations"].as_array().unwrap();
    assert_eq!(translations[0]["text"], "[en] good morning");
    assert!(translations.len() <= 4);
    assert!(
        translations
            .iter()
            .all(|t| (0.0..=1.0).contains(&t["confidence"].as_f64().unwrap()))
    );
}

#[tokio::test]
async fn test_translate_input_errors() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let same = app
        .request(
            "POST",
            "/api/v1/translate",
            Some(json!({ "text": "hi", "languageFrom": "ENGLISH", "languageTo": "ENGLISH" })),
            Some(&token),
        )
        .await;
    assert_eq!(same.status, StatusCode::BAD_REQUEST);
    assert_eq!(same.body["error"], "SAME_LANGUAGE");

    let empty = app
        .request(
            "POST",
            "/api/v1/translate",
            Some(json!({ "text": "   ", "languageFrom": "ENGLISH", "languageTo": "FRENCH" })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"], "EMPTY_TEXT");
}

#[tokio::test]
async fn test_provider_outage_is_server_error() {
    let translator = helpers::FakeTranslator {
        failure: Some("503 Service Unavailable".to_string()),
        ..helpers::FakeTranslator::default()
    };
    let app = helpers::TestApp::with_translator(Arc::new(translator));
    let token = app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/translate",
            Some(json!({ "text": "hi", "languageFrom": "ENGLISH", "languageTo": "GERMAN" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "TRANSLATION_FAILED");
}

#[tokio::test]
async fn test_missing_credentials() {
    let provider = GoogleTranslateProvider::new(&TranslateConfig::default()).unwrap();
    let app = helpers::TestApp::with_translator(Arc::new(provider));
    let token = app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/translate/detect",
            Some(json!({ "text": "hello" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "CREDENTIALS_ERROR");
}

#[tokio::test]
async fn test_detect_and_languages() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let detected = app
        .request(
            "POST",
            "/api/v1/translate/detect",
            Some(json!({ "text": "გამარჯობა" })),
            Some(&token),
        )
        .await;
    assert_eq!(detected.status, StatusCode::OK);
    assert_eq!(detected.body["detectedLanguage"], "GEORGIAN");
    assert_eq!(detected.body["text"], "გამარჯობა");

    let languages = app
        .request("GET", "/api/v1/translate/languages", None, Some(&token))
        .await;
    assert_eq!(languages.status, StatusCode::OK);
    assert_eq!(languages.body["languages"].as_array().unwrap().len(), 8);
    assert_eq!(languages.body["languages"][0], "ENGLISH");
}
