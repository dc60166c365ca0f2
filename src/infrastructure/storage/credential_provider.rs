use crate::application::ports::credential_provider::CredentialProvider;
use crate::shared::config::{AuthConfig, CredentialSource};
use crate::shared::error::AppError;
use anyhow::Context;
use async_trait::async_trait;
use keyring::Entry;
use std::sync::Arc;
use tracing::debug;

/// 固定値（またはなし）を返す資格情報プロバイダー
pub struct StaticCredentialProvider {
    token: Option<String>,
}

impl StaticCredentialProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn current_credential(&self) -> Result<Option<String>, AppError> {
        Ok(self.token.clone())
    }
}

/// 環境変数からトークンを読む（呼び出しのたびに読み直す）
pub struct EnvCredentialProvider {
    var_name: String,
}

impl EnvCredentialProvider {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn current_credential(&self) -> Result<Option<String>, AppError> {
        match std::env::var(&self.var_name) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value)),
            Ok(_) | Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(AppError::Auth(format!("{}: {err}", self.var_name))),
        }
    }
}

/// OS のキーチェーンに保存されたトークンを読む
pub struct KeyringCredentialProvider {
    service: String,
    account: String,
}

impl KeyringCredentialProvider {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    fn read_token(&self) -> anyhow::Result<Option<String>> {
        let entry =
            Entry::new(&self.service, &self.account).context("Failed to create keyring entry")?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("Failed to read session token: {e}")),
        }
    }
}

#[async_trait]
impl CredentialProvider for KeyringCredentialProvider {
    async fn current_credential(&self) -> Result<Option<String>, AppError> {
        let token = self
            .read_token()
            .map_err(|err| AppError::Auth(err.to_string()))?;
        if token.is_none() {
            debug!(service = %self.service, account = %self.account, "no session token in keyring");
        }
        Ok(token)
    }
}

/// 設定に応じたプロバイダーを組み立てる
pub fn build_credential_provider(config: &AuthConfig) -> Arc<dyn CredentialProvider> {
    match config.credential_source {
        CredentialSource::None => Arc::new(StaticCredentialProvider::anonymous()),
        CredentialSource::Env => Arc::new(EnvCredentialProvider::new(&config.token_env_var)),
        CredentialSource::Keyring => Arc::new(KeyringCredentialProvider::new(
            &config.keyring_service,
            &config.keyring_account,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::AppConfig;

    #[tokio::test]
    async fn static_provider_returns_configured_token() {
        let provider = StaticCredentialProvider::new(Some("abc".into()));
        assert_eq!(provider.current_credential().await.unwrap().as_deref(), Some("abc"));
        assert_eq!(
            StaticCredentialProvider::anonymous()
                .current_credential()
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn env_provider_treats_missing_variable_as_no_credential() {
        let provider = EnvCredentialProvider::new("JOB_TRACKER_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(provider.current_credential().await.unwrap(), None);
    }

    #[tokio::test]
    async fn default_config_builds_anonymous_provider() {
        let provider = build_credential_provider(&AppConfig::default().auth);
        assert_eq!(provider.current_credential().await.unwrap(), None);
    }
}
