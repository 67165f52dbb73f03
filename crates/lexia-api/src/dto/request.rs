//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use lexia_core::error::AppError;
use lexia_core::types::FolderId;
use lexia_entity::folder::{FolderKind, Language};

/// Runs `validator` rules and reports the first failure as a validation error.
pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| AppError::validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .next()
        .and_then(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}"),
            })
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Display name.
    #[validate(length(min = 2, max = 50, message = "Username must be 2 to 50 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,
}

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Rename the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Folder kind.
    #[serde(rename = "type")]
    pub kind: FolderKind,
    /// Source language (word collections).
    #[serde(default)]
    pub language_from: Option<Language>,
    /// Target language (word collections).
    #[serde(default)]
    pub language_to: Option<Language>,
    /// Parent folder; absent for a root.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Rename and/or reparent a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New parent.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Move a folder; `null` promotes it to a root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFolderRequest {
    /// Target parent.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Create word request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordRequest {
    /// Word text.
    pub text: String,
    /// Definition or translation.
    #[serde(default)]
    pub definition: String,
    /// Owning word collection.
    pub folder_id: FolderId,
}

/// Partial word update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWordRequest {
    /// New text.
    #[serde(default)]
    pub text: Option<String>,
    /// New definition.
    #[serde(default)]
    pub definition: Option<String>,
}

/// `?text=` for the duplicate check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DuplicateQuery {
    /// Text to look for.
    #[serde(default)]
    pub text: String,
}

/// Translate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Text to translate.
    pub text: String,
    /// Source language.
    pub language_from: Language,
    /// Target language.
    pub language_to: Language,
}

/// Detect request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    /// Text to inspect.
    pub text: String,
}
