use crate::application::ports::credential_provider::CredentialProvider;
use crate::application::ports::preference_store::PreferenceStore;
use crate::application::services::{
    NotificationService, PreferenceService, SyncOptions, SyncService,
};
use crate::infrastructure::http::HttpApplicationRecordStore;
use crate::infrastructure::storage::{JsonFilePreferenceStore, build_credential_provider};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// アプリケーション全体の状態を管理する構造体
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub notifications: Arc<NotificationService>,
    pub tracker: Arc<SyncService>,
}

impl AppState {
    /// 設定から HTTP ストア・設定ファイル・資格情報を組み立てる
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;
        let credentials = build_credential_provider(&config.auth);
        let preferences: Arc<dyn PreferenceStore> = Arc::new(JsonFilePreferenceStore::new(
            config.storage.preferences_path.clone(),
        ));
        Self::with_collaborators(config, credentials, preferences).await
    }

    pub async fn with_collaborators(
        config: AppConfig,
        credentials: Arc<dyn CredentialProvider>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self, AppError> {
        let timeout = config.api.request_timeout_secs.map(Duration::from_secs);
        let store = Arc::new(HttpApplicationRecordStore::new(
            config.api.base_url.clone(),
            timeout,
            credentials,
        )?);
        let notifications = Arc::new(NotificationService::new(Duration::from_millis(
            config.notifications.display_duration_ms,
        )));
        let tracker = SyncService::initialize(
            store,
            PreferenceService::new(preferences),
            Arc::clone(&notifications),
            SyncOptions {
                surface_validation_errors: config.notifications.surface_validation_errors,
            },
        )
        .await;

        info!(base_url = %config.api.base_url, "job tracker state initialized");
        Ok(Self {
            config: Arc::new(config),
            notifications,
            tracker: Arc::new(tracker),
        })
    }
}
