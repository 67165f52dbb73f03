//! Route definitions for the Lexia HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` router without middleware.
pub fn build_router() -> Router<AppState> {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(word_routes())
        .merge(translate_routes());

    Router::new().nest("/api/v1", api_routes)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Sign-up, sign-in, token status
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/status", get(handlers::auth::status))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/auth", get(handlers::user::current_user))
        .route("/user", put(handlers::user::update_user))
}

/// Folder forest: reads, create, rename/reparent, move, delete
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route("/folders/root", get(handlers::folder::list_root_folders))
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/subfolders", get(handlers::folder::list_subfolders))
        .route("/folders/{id}/words", get(handlers::folder::list_words))
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
}

fn word_routes() -> Router<AppState> {
    Router::new()
        .route("/words", post(handlers::word::create_word))
        .route("/words/check-duplicate", get(handlers::word::check_duplicate))
        .route(
            "/words/{id}",
            get(handlers::word::get_word)
                .put(handlers::word::update_word)
                .delete(handlers::word::delete_word),
        )
}

fn translate_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(handlers::translate::translate))
        .route("/translate/detect", post(handlers::translate::detect))
        .route("/translate/languages", get(handlers::translate::languages))
}
