//! Integration tests for words and the duplicate check.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_word_lifecycle_tracks_word_count() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;
    let verbs = app.word_collection(&token, "Verbs", None).await;

    let created = app
        .request(
            "POST",
            "/api/v1/words",
            Some(json!({ "text": "  წერა ", "definition": "to write", "folderId": verbs })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["text"], "წერა");
    assert_eq!(created.body["folderId"], verbs.as_str());
    let word_id = created.body["id"].as_str().unwrap().to_string();

    let folder = app
        .request("GET", &format!("/api/v1/folders/{verbs}"), None, Some(&token))
        .await;
    assert_eq!(folder.body["wordCount"], 1);
    assert_eq!(folder.body["hasWords"], true);
    assert_eq!(folder.body["words"][0]["id"], word_id.as_str());

    let updated = app
        .request(
            "PUT",
            &format!("/api/v1/words/{word_id}"),
            Some(json!({ "definition": "writing" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["definition"], "writing");
    assert_eq!(updated.body["text"], "წერა");

    let listed = app
        .request("GET", &format!("/api/v1/folders/{verbs}/words"), None, Some(&token))
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let blocked = app
        .request("DELETE", &format!("/api/v1/folders/{verbs}"), None, Some(&token))
        .await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);
    assert_eq!(blocked.body["message"], "Cannot delete folder that contains words");

    let deleted = app
        .request("DELETE", &format!("/api/v1/words/{word_id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let folder = app
        .request("GET", &format!("/api/v1/folders/{verbs}"), None, Some(&token))
        .await;
    assert_eq!(folder.body["wordCount"], 0);
    assert_eq!(folder.body["hasWords"], false);
}

#[tokio::test]
async fn test_words_only_in_word_collections() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;
    let shelf = app.collection(&token, "Shelf", None).await;

    let response = app
        .request(
            "POST",
            "/api/v1/words",
            Some(json!({ "text": "book", "definition": "", "folderId": shelf })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_OPERATION");
}

#[tokio::test]
async fn test_words_of_other_users_are_forbidden() {
    let app = helpers::TestApp::new();
    let alice = app.sign_up("alice", "alice@example.com").await;
    let bob = app.sign_up("bob", "bob@example.com").await;
    let verbs = app.word_collection(&alice, "Verbs", None).await;

    let created = app
        .request(
            "POST",
            "/api/v1/words",
            Some(json!({ "text": "წერა", "definition": "to write", "folderId": verbs })),
            Some(&alice),
        )
        .await;
    let word_id = created.body["id"].as_str().unwrap().to_string();

    let read = app
        .request("GET", &format!("/api/v1/words/{word_id}"), None, Some(&bob))
        .await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);

    let plant = app
        .request(
            "POST",
            "/api/v1/words",
            Some(json!({ "text": "spam", "definition": "", "folderId": verbs })),
            Some(&bob),
        )
        .await;
    assert_eq!(plant.status, StatusCode::FORBIDDEN);

    let check = app
        .request(
            "GET",
            "/api/v1/words/check-duplicate?text=%E1%83%AC%E1%83%94%E1%83%A0%E1%83%90",
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["isDuplicate"], false);
    assert!(check.body.get("word").is_none());
}

#[tokio::test]
async fn test_duplicate_check_reports_folder_path() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;
    let languages = app.collection(&token, "Languages", None).await;
    let verbs = app.word_collection(&token, "Verbs", Some(&languages)).await;

    app.request(
        "POST",
        "/api/v1/words",
        Some(json!({ "text": "Hello", "definition": "გამარჯობა", "folderId": verbs })),
        Some(&token),
    )
    .await;

    let check = app
        .request(
            "GET",
            "/api/v1/words/check-duplicate?text=hello",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["isDuplicate"], true);
    assert_eq!(check.body["word"]["text"], "Hello");
    assert_eq!(
        check.body["word"]["folderPath"],
        json!([
            { "id": languages, "name": "Languages" },
            { "id": verbs, "name": "Verbs" },
        ])
    );

    let missing = app
        .request("GET", "/api/v1/words/check-duplicate?text=", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}
