//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use lexia_core::types::{FolderId, UserId, WordId};
use lexia_entity::folder::{Folder, FolderKind, FolderNode, Language};
use lexia_entity::user::User;
use lexia_entity::word::Word;
use lexia_service::auth::AuthPayload;
use lexia_service::folder::FolderDetail;
use lexia_service::translate::{DetectedLanguage, Translation, TranslationVariant};
use lexia_service::word::DuplicateCheck;

use super::timestamp;

/// `{ "ok": true }`
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

impl OkResponse {
    /// The only value.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            name: user.username,
            email: user.email,
        }
    }
}

/// Token plus the signed-in user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

impl From<AuthPayload> for AuthResponse {
    fn from(payload: AuthPayload) -> Self {
        Self {
            access_token: payload.access_token,
            user: payload.user.into(),
        }
    }
}

/// A folder, optionally with loaded subfolders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    pub id: FolderId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FolderKind,
    pub word_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_from: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_to: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subfolders: Vec<FolderResponse>,
    pub has_words: bool,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            has_words: folder.has_words(),
            id: folder.id,
            name: folder.name,
            kind: folder.kind,
            word_count: folder.word_count,
            language_from: folder.language_from,
            language_to: folder.language_to,
            parent_id: folder.parent_id,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
            subfolders: Vec::new(),
        }
    }
}

impl From<FolderNode> for FolderResponse {
    fn from(node: FolderNode) -> Self {
        let mut response = Self::from(node.folder);
        response.subfolders = node.subfolders.into_iter().map(Self::from).collect();
        response
    }
}

/// A folder with its parent, direct subfolders and words.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDetailResponse {
    #[serde(flatten)]
    pub folder: FolderResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<FolderResponse>,
    pub words: Vec<WordResponse>,
}

impl From<FolderDetail> for FolderDetailResponse {
    fn from(detail: FolderDetail) -> Self {
        let mut folder = FolderResponse::from(detail.folder);
        folder.subfolders = detail.subfolders.into_iter().map(FolderResponse::from).collect();
        Self {
            folder,
            parent: detail.parent.map(FolderResponse::from),
            words: detail.words.into_iter().map(WordResponse::from).collect(),
        }
    }
}

/// A word.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResponse {
    pub id: WordId,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
    pub text: String,
    pub definition: String,
    pub folder_id: FolderId,
}

impl From<Word> for WordResponse {
    fn from(word: Word) -> Self {
        Self {
            id: word.id,
            created_at: word.created_at,
            updated_at: word.updated_at,
            text: word.text,
            definition: word.definition,
            folder_id: word.folder_id,
        }
    }
}

/// One hop of a folder path.
#[derive(Debug, Clone, Serialize)]
pub struct FolderPathItem {
    pub id: FolderId,
    pub name: String,
}

/// The existing word reported by a duplicate check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateWordResponse {
    #[serde(flatten)]
    pub word: WordResponse,
    pub folder_path: Vec<FolderPathItem>,
}

/// Result of a duplicate check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckResponse {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<DuplicateWordResponse>,
}

impl From<DuplicateCheck> for DuplicateCheckResponse {
    fn from(check: DuplicateCheck) -> Self {
        Self {
            is_duplicate: check.is_duplicate(),
            word: check.existing.map(|found| DuplicateWordResponse {
                word: found.word.into(),
                folder_path: found
                    .folder_path
                    .into_iter()
                    .map(|f| FolderPathItem {
                        id: f.id,
                        name: f.name,
                    })
                    .collect(),
            }),
        }
    }
}

/// Translation result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub original_text: String,
    pub language_from: Language,
    pub language_to: Language,
    pub translations: Vec<TranslationVariant>,
}

impl From<Translation> for TranslateResponse {
    fn from(t: Translation) -> Self {
        Self {
            original_text: t.original_text,
            language_from: t.language_from,
            language_to: t.language_to,
            translations: t.variants,
        }
    }
}

/// Detection result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub detected_language: Language,
    pub confidence: f32,
    pub text: String,
}

impl From<DetectedLanguage> for DetectResponse {
    fn from(d: DetectedLanguage) -> Self {
        Self {
            detected_language: d.language,
            confidence: d.confidence,
            text: d.text,
        }
    }
}

/// Supported languages.
#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<Language>,
}
