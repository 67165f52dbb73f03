//! Folder tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use lexia_core::types::FolderId;
use lexia_service::folder::{CreateFolderRequest as NewFolder, UpdateFolderRequest as FolderChanges};

use crate::dto::request::{CreateFolderRequest, MoveFolderRequest, UpdateFolderRequest};
use crate::dto::response::{FolderDetailResponse, FolderResponse, WordResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = state.folder_service.get_user_folders(&auth).await?;
    Ok(Json(folders.into_iter().map(FolderResponse::from).collect()))
}

/// GET /api/v1/folders/root
pub async fn list_root_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let roots = state.folder_service.get_root_folders(&auth).await?;
    Ok(Json(roots.into_iter().map(FolderResponse::from).collect()))
}

/// GET /api/v1/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<FolderDetailResponse>, ApiError> {
    let detail = state.folder_service.get_folder_by_id(&auth, id).await?;
    Ok(Json(detail.into()))
}

/// GET /api/v1/folders/{id}/subfolders
pub async fn list_subfolders(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let children = state.folder_service.get_subfolders(&auth, id).await?;
    Ok(Json(children.into_iter().map(FolderResponse::from).collect()))
}

/// GET /api/v1/folders/{id}/words
pub async fn list_words(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<Vec<WordResponse>>, ApiError> {
    let words = state.word_service.get_folder_words(&auth, id).await?;
    Ok(Json(words.into_iter().map(WordResponse::from).collect()))
}

/// POST /api/v1/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<FolderResponse>), ApiError> {
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            NewFolder {
                name: req.name,
                kind: req.kind,
                language_from: req.language_from,
                language_to: req.language_to,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(folder.into())))
}

/// PUT /api/v1/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<UpdateFolderRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = state
        .folder_service
        .update_folder(
            &auth,
            id,
            FolderChanges {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok(Json(folder.into()))
}

/// PUT /api/v1/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<MoveFolderRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = state
        .folder_service
        .move_folder(&auth, id, req.parent_id)
        .await?;
    Ok(Json(folder.into()))
}

/// DELETE /api/v1/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<StatusCode, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
