use crate::shared::error::AppError;
use async_trait::async_trait;

/// プロセス全体で共有するキー・バリュー形式の設定保存先
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}
