//! Integration tests for sign-up, sign-in and the current user.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sign_up_returns_token_and_user() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/sign-up",
            Some(json!({
                "username": "nino",
                "email": "nino@example.com",
                "password": "Passw0rd!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["accessToken"].as_str().is_some());
    assert_eq!(response.body["user"]["name"], "nino");
    assert_eq!(response.body["user"]["email"], "nino@example.com");
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();
    app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/sign-up",
            Some(json!({
                "username": "other",
                "email": "nino@example.com",
                "password": "Passw0rd!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/sign-up",
            Some(json!({
                "username": "nino",
                "email": "nino@example.com",
                "password": "alllowercase1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_in_success_and_failures_look_alike() {
    let app = helpers::TestApp::new();
    app.sign_up("nino", "nino@example.com").await;

    let ok = app
        .request(
            "POST",
            "/api/v1/auth/sign-in",
            Some(json!({ "email": "nino@example.com", "password": "Passw0rd!" })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert!(ok.body["accessToken"].as_str().is_some());

    let wrong_password = app
        .request(
            "POST",
            "/api/v1/auth/sign-in",
            Some(json!({ "email": "nino@example.com", "password": "Wrong000!" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/v1/auth/sign-in",
            Some(json!({ "email": "nobody@example.com", "password": "Passw0rd!" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "INVALID_EMAIL_OR_PASSWORD");
}

#[tokio::test]
async fn test_status_requires_valid_token() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let missing = app.request("GET", "/api/v1/auth/status", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "MISSING_TOKEN");

    let garbage = app
        .request("GET", "/api/v1/auth/status", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "INVALID_TOKEN");

    let ok = app
        .request("GET", "/api/v1/auth/status", None, Some(&token))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["ok"], true);
}

#[tokio::test]
async fn test_current_user_and_rename() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let me = app.request("GET", "/api/v1/user/auth", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["name"], "nino");

    let renamed = app
        .request(
            "PUT",
            "/api/v1/user",
            Some(json!({ "name": "nino_k" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["name"], "nino_k");
    assert_eq!(renamed.body["id"], me.body["id"]);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));
}
