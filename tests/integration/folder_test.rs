//! Integration tests for the folder tree endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_and_read_nested_folders() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let languages = app.collection(&token, "Languages", None).await;
    let georgian = app.collection(&token, "Georgian", Some(&languages)).await;
    let verbs = app.word_collection(&token, "Verbs", Some(&georgian)).await;

    let detail = app
        .request("GET", &format!("/api/v1/folders/{georgian}"), None, Some(&token))
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["name"], "Georgian");
    assert_eq!(detail.body["type"], "FOLDER_COLLECTION");
    assert_eq!(detail.body["parentId"], languages.as_str());
    assert_eq!(detail.body["parent"]["id"], languages.as_str());
    assert_eq!(detail.body["subfolders"][0]["id"], verbs.as_str());
    assert_eq!(detail.body["hasWords"], false);

    let created_at = detail.body["createdAt"].as_str().unwrap();
    assert_eq!(created_at.len(), 20);
    assert!(created_at.ends_with('Z'));

    let word_collection = app
        .request("GET", &format!("/api/v1/folders/{verbs}"), None, Some(&token))
        .await;
    assert_eq!(word_collection.body["languageFrom"], "GEORGIAN");
    assert_eq!(word_collection.body["languageTo"], "ENGLISH");
    assert_eq!(word_collection.body["wordCount"], 0);
}

#[tokio::test]
async fn test_root_forest_loads_two_levels() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let a = app.collection(&token, "A", None).await;
    let b = app.collection(&token, "B", Some(&a)).await;
    let c = app.collection(&token, "C", Some(&b)).await;
    app.collection(&token, "D", Some(&c)).await;
    app.collection(&token, "Other root", None).await;

    let roots = app.request("GET", "/api/v1/folders/root", None, Some(&token)).await;
    assert_eq!(roots.status, StatusCode::OK);
    let roots = roots.body.as_array().unwrap().clone();
    assert_eq!(roots.len(), 2);

    let a_node = roots.iter().find(|r| r["id"] == a.as_str()).unwrap();
    assert_eq!(a_node["subfolders"][0]["id"], b.as_str());
    assert_eq!(a_node["subfolders"][0]["subfolders"][0]["id"], c.as_str());
    assert!(a_node["subfolders"][0]["subfolders"][0].get("subfolders").is_none());

    let all = app.request("GET", "/api/v1/folders", None, Some(&token)).await;
    assert_eq!(all.body.as_array().unwrap().len(), 5);

    let children = app
        .request("GET", &format!("/api/v1/folders/{b}/subfolders"), None, Some(&token))
        .await;
    assert_eq!(children.body.as_array().unwrap().len(), 1);
    assert_eq!(children.body[0]["id"], c.as_str());
}

#[tokio::test]
async fn test_word_collection_cannot_hold_subfolders() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;
    let verbs = app.word_collection(&token, "Verbs", None).await;

    let response = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Nested", "type": "FOLDER_COLLECTION", "parentId": verbs })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_OPERATION");
    assert_eq!(response.body["message"], "Cannot add subfolders to a word collection");
}

#[tokio::test]
async fn test_word_collection_requires_source_language() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Verbs", "type": "WORD_COLLECTION" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_move_rejects_cycles_and_self() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let a = app.collection(&token, "A", None).await;
    let b = app.collection(&token, "B", Some(&a)).await;
    let c = app.collection(&token, "C", Some(&b)).await;

    let cycle = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{a}/move"),
            Some(json!({ "parentId": c })),
            Some(&token),
        )
        .await;
    assert_eq!(cycle.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        cycle.body["message"],
        "Cannot move folder: circular reference detected"
    );

    let itself = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{b}"),
            Some(json!({ "parentId": b })),
            Some(&token),
        )
        .await;
    assert_eq!(itself.status, StatusCode::BAD_REQUEST);
    assert_eq!(itself.body["message"], "Cannot move folder into itself");

    let unchanged = app
        .request("GET", &format!("/api/v1/folders/{a}"), None, Some(&token))
        .await;
    assert!(unchanged.body.get("parentId").is_none());
}

#[tokio::test]
async fn test_move_to_root_and_rename() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let a = app.collection(&token, "A", None).await;
    let b = app.collection(&token, "B", Some(&a)).await;

    let moved = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{b}/move"),
            Some(json!({ "parentId": null })),
            Some(&token),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert!(moved.body.get("parentId").is_none());

    let renamed = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{b}"),
            Some(json!({ "name": "  Renamed  ", "parentId": a })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["name"], "Renamed");
    assert_eq!(renamed.body["parentId"], a.as_str());
}

#[tokio::test]
async fn test_foreign_folders_are_forbidden() {
    let app = helpers::TestApp::new();
    let alice = app.sign_up("alice", "alice@example.com").await;
    let bob = app.sign_up("bob", "bob@example.com").await;

    let private = app.collection(&alice, "Private", None).await;
    let bobs = app.collection(&bob, "Mine", None).await;

    let read = app
        .request("GET", &format!("/api/v1/folders/{private}"), None, Some(&bob))
        .await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);
    assert_eq!(read.body["message"], "Access denied");

    let steal = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{bobs}/move"),
            Some(json!({ "parentId": private })),
            Some(&bob),
        )
        .await;
    assert_eq!(steal.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/v1/folders/{private}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let roots = app.request("GET", "/api/v1/folders/root", None, Some(&bob)).await;
    assert_eq!(roots.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_folder_is_not_found() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "GET",
            "/api/v1/folders/0190f3a2-6d1c-7b5e-9d3f-123456789abc",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_only_empty_folders() {
    let app = helpers::TestApp::new();
    let token = app.sign_up("nino", "nino@example.com").await;

    let parent = app.collection(&token, "Parent", None).await;
    let child = app.collection(&token, "Child", Some(&parent)).await;

    let blocked = app
        .request("DELETE", &format!("/api/v1/folders/{parent}"), None, Some(&token))
        .await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        blocked.body["message"],
        "Cannot delete folder that contains subfolders"
    );

    let leaf = app
        .request("DELETE", &format!("/api/v1/folders/{child}"), None, Some(&token))
        .await;
    assert_eq!(leaf.status, StatusCode::NO_CONTENT);

    let now_empty = app
        .request("DELETE", &format!("/api/v1/folders/{parent}"), None, Some(&token))
        .await;
    assert_eq!(now_empty.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/v1/folders/{parent}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folder_routes_require_auth() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/v1/folders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
