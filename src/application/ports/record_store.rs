use crate::domain::entities::ApplicationRecord;
use crate::domain::value_objects::RecordId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// 応募レコードを保持するリモートストア
///
/// 失敗はすべて `AppError::Remote` に正規化される。リトライは行わない。
#[async_trait]
pub trait ApplicationRecordStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ApplicationRecord>, AppError>;

    /// `id` なしのレコードを作成し、採番済みのレコードを返す
    async fn create(&self, record: &ApplicationRecord) -> Result<ApplicationRecord, AppError>;

    async fn update(&self, id: RecordId, record: &ApplicationRecord) -> Result<(), AppError>;

    async fn delete(&self, id: RecordId) -> Result<(), AppError>;
}
