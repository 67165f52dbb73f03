//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use lexia_auth::jwt::{JwtDecoder, JwtEncoder};
use lexia_auth::password::{PasswordHasher, PasswordValidator};
use lexia_core::config::AppConfig;
use lexia_database::store::{FolderStore, UserStore, WordStore};
use lexia_service::auth::AuthService;
use lexia_service::folder::FolderService;
use lexia_service::translate::{TranslateService, TranslationProvider};
use lexia_service::user::UserService;
use lexia_service::word::WordService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Sign-up and sign-in
    pub auth_service: Arc<AuthService>,
    /// User accounts
    pub user_service: Arc<UserService>,
    /// Folder tree manager
    pub folder_service: Arc<FolderService>,
    /// Words in word collections
    pub word_service: Arc<WordService>,
    /// Translation and language detection
    pub translate_service: Arc<TranslateService>,
}

impl AppState {
    /// Wires every service over the given stores and translation provider.
    pub fn new(
        config: AppConfig,
        folders: Arc<dyn FolderStore>,
        words: Arc<dyn WordStore>,
        users: Arc<dyn UserStore>,
        translator: Arc<dyn TranslationProvider>,
    ) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let user_service = UserService::new(users, Arc::clone(&hasher), validator);
        let auth_service = AuthService::new(user_service.clone(), hasher, encoder);
        let folder_service = FolderService::new(folders, Arc::clone(&words), config.folders.clone());
        let word_service = WordService::new(words, folder_service.clone());
        let translate_service = TranslateService::new(translator, &config.translate);

        Self {
            config: Arc::new(config),
            jwt_decoder,
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            folder_service: Arc::new(folder_service),
            word_service: Arc::new(word_service),
            translate_service: Arc::new(translate_service),
        }
    }
}
