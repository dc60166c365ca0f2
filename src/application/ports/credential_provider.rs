use crate::shared::error::AppError;
use async_trait::async_trait;

/// 現在のセッション資格情報（ベアラートークン）の読み出し口
///
/// 呼び出しごとに読み出し、結果をキャッシュしないこと。
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn current_credential(&self) -> Result<Option<String>, AppError>;
}
