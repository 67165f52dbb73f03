//! Folder, word and user flows over the PostgreSQL repositories.
//!
//! Each test returns early unless `DATABASE_URL` points at a scratch database.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use lexia_core::config::FolderConfig;
use lexia_core::types::FolderId;
use lexia_database::FolderStore;
use lexia_entity::folder::{Folder, FolderKind};
use lexia_entity::user::CreateUser;
use lexia_service::context::RequestContext;
use lexia_service::folder::{CreateFolderRequest, FolderService};

macro_rules! postgres_app {
    () => {
        match helpers::TestApp::postgres().await {
            Some(app) => app,
            None => return,
        }
    };
}

#[tokio::test]
async fn test_pg_folder_tree_rules() {
    let app = postgres_app!();
    let token = app.sign_up("nino", "nino@example.com").await;

    let a = app.collection(&token, "A", None).await;
    let b = app.collection(&token, "B", Some(&a)).await;
    let c = app.collection(&token, "C", Some(&b)).await;
    let verbs = app.word_collection(&token, "Verbs", Some(&c)).await;

    let roots = app.request("GET", "/api/v1/folders/root", None, Some(&token)).await;
    assert_eq!(roots.status, StatusCode::OK);
    assert_eq!(roots.body.as_array().unwrap().len(), 1);
    assert_eq!(roots.body[0]["subfolders"][0]["id"], b.as_str());
    assert_eq!(roots.body[0]["subfolders"][0]["subfolders"][0]["id"], c.as_str());
    assert!(roots.body[0]["subfolders"][0]["subfolders"][0].get("subfolders").is_none());

    let detail = app
        .request("GET", &format!("/api/v1/folders/{verbs}"), None, Some(&token))
        .await;
    assert_eq!(detail.body["type"], "WORD_COLLECTION");
    assert_eq!(detail.body["languageFrom"], "GEORGIAN");
    assert_eq!(detail.body["parent"]["id"], c.as_str());

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

    let nested = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Nested", "type": "FOLDER_COLLECTION", "parentId": verbs })),
            Some(&token),
        )
        .await;
    assert_eq!(nested.status, StatusCode::BAD_REQUEST);

    let moved = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{c}/move"),
            Some(json!({ "parentId": null })),
            Some(&token),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert!(moved.body.get("parentId").is_none());

    let blocked = app
        .request("DELETE", &format!("/api/v1/folders/{c}"), None, Some(&token))
        .await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);

    let leaf = app
        .request("DELETE", &format!("/api/v1/folders/{b}"), None, Some(&token))
        .await;
    assert_eq!(leaf.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_pg_word_count_and_duplicate_path() {
    let app = postgres_app!();
    let token = app.sign_up("nino", "nino@example.com").await;
    let languages = app.collection(&token, "Languages", None).await;
    let georgian = app.collection(&token, "Georgian", Some(&languages)).await;
    let verbs = app.word_collection(&token, "Verbs", Some(&georgian)).await;

    let created = app
        .request(
            "POST",
            "/api/v1/words",
            Some(json!({ "text": "Hello", "definition": "გამარჯობა", "folderId": verbs })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let word_id = created.body["id"].as_str().unwrap().to_string();

    let folder = app
        .request("GET", &format!("/api/v1/folders/{verbs}"), None, Some(&token))
        .await;
    assert_eq!(folder.body["wordCount"], 1);
    assert_eq!(folder.body["hasWords"], true);

    let check = app
        .request("GET", "/api/v1/words/check-duplicate?text=HELLO", None, Some(&token))
        .await;
    assert_eq!(check.body["isDuplicate"], true);
    assert_eq!(
        check.body["word"]["folderPath"],
        json!([
            { "id": languages, "name": "Languages" },
            { "id": georgian, "name": "Georgian" },
            { "id": verbs, "name": "Verbs" },
        ])
    );

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
async fn test_pg_duplicate_email_ignores_case() {
    let app = postgres_app!();
    app.sign_up("nino", "nino@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/sign-up",
            Some(json!({
                "username": "other",
                "email": "Nino@Example.com",
                "password": "Passw0rd!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "EMAIL_ALREADY_EXISTS");
}

fn collection(name: String, parent_id: Option<FolderId>) -> CreateFolderRequest {
    CreateFolderRequest {
        name,
        kind: FolderKind::FolderCollection,
        language_from: None,
        language_to: None,
        parent_id,
    }
}

async fn assert_no_cycle(store: &dyn FolderStore, start: FolderId) {
    let mut seen = HashSet::from([start]);
    let mut cursor = store.find_by_id(start).await.unwrap().and_then(|f| f.parent_id);
    while let Some(id) = cursor {
        assert!(seen.insert(id), "cycle through {start}");
        cursor = store.find_by_id(id).await.unwrap().and_then(|f| f.parent_id);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pg_crossing_moves_never_commit_a_cycle() {
    let Some(database) = helpers::TestDatabase::connect().await else {
        return;
    };
    let stores = database.stores();
    let owner = stores
        .users
        .create(&CreateUser {
            username: "nino".to_string(),
            email: "nino@example.com".to_string(),
            password_hash: "unused".to_string(),
        })
        .await
        .unwrap();
    let ctx = RequestContext::new(owner.id, owner.email.clone());
    let service = Arc::new(FolderService::new(
        Arc::clone(&stores.folders),
        Arc::clone(&stores.words),
        FolderConfig::default(),
    ));

    for round in 0..20 {
        let mut made: Vec<Folder> = Vec::new();
        for (name, parent) in [("A", None), ("A1", Some(0)), ("B", None), ("B1", Some(2))] {
            let parent_id = parent.map(|i: usize| made[i].id);
            let folder = service
                .create_folder(&ctx, collection(format!("{name}-{round}"), parent_id))
                .await
                .unwrap();
            made.push(folder);
        }
        let (a, a1, b, b1) = (made[0].id, made[1].id, made[2].id, made[3].id);

        let first = tokio::spawn({
            let (service, ctx) = (Arc::clone(&service), ctx.clone());
            async move { service.move_folder(&ctx, a, Some(b1)).await }
        });
        let second = tokio::spawn({
            let (service, ctx) = (Arc::clone(&service), ctx.clone());
            async move { service.move_folder(&ctx, b, Some(a1)).await }
        });
        let (first, second) = (first.await.unwrap(), second.await.unwrap());

        assert!(
            first.is_ok() != second.is_ok(),
            "round {round}: exactly one crossing move may commit"
        );
        assert_no_cycle(stores.folders.as_ref(), a).await;
        assert_no_cycle(stores.folders.as_ref(), b).await;
    }
}
