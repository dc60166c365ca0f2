use crate::domain::value_objects::{ApplicationStatus, AppliedDate, RecordId};
use serde::{Deserialize, Deserializer, Serialize};

/// 応募レコード。`id` はバックエンドで永続化されるまで `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub applied_date: AppliedDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl ApplicationRecord {
    pub fn has_id(&self, id: RecordId) -> bool {
        self.id == Some(id)
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
