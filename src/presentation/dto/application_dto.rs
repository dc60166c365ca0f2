use super::Validate;
use crate::domain::entities::{ApplicationForm, ApplicationRecord, Notification};
use crate::domain::value_objects::{AppliedDate, ApplicationStatus};
use serde::{Deserialize, Serialize};

// レスポンスDTO
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecordDto {
    pub id: Option<i64>,
    pub company: String,
    pub role: String,
    pub status: u8,
    pub status_label: String,
    pub applied_date: String,
    pub notes: String,
}

impl From<&ApplicationRecord> for ApplicationRecordDto {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            id: record.id.map(|id| id.value()),
            company: record.company.clone(),
            role: record.role.clone(),
            status: record.status.code(),
            status_label: record.status.label().to_string(),
            applied_date: record.applied_date.date().format("%Y-%m-%d").to_string(),
            notes: record.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationDto {
    pub message: String,
    pub kind: String,
    pub expires_at: i64,
}

impl From<&Notification> for NotificationDto {
    fn from(notification: &Notification) -> Self {
        Self {
            message: notification.message.clone(),
            kind: if notification.is_error() { "error" } else { "success" }.to_string(),
            expires_at: notification.expires_at.timestamp_millis(),
        }
    }
}

// リクエストDTO
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ApplicationInput {
    pub company: String,
    pub role: String,
    pub status: Option<u8>,
    pub applied_date: Option<String>,
    pub notes: Option<String>,
}

impl Validate for ApplicationInput {
    fn validate(&self) -> Result<(), String> {
        if let Some(code) = self.status {
            ApplicationStatus::try_from(code)?;
        }
        if let Some(date) = &self.applied_date {
            AppliedDate::parse(date)?;
        }
        Ok(())
    }
}

impl ApplicationInput {
    /// 未指定の項目は `base` の値を引き継ぐ
    ///
    /// company/role の空チェックはここでは行わない（同期エンジン側で弾く）。
    pub fn apply_to(&self, base: ApplicationForm) -> Result<ApplicationForm, String> {
        self.validate()?;
        let mut form = base;
        if !self.company.is_empty() {
            form.company = self.company.clone();
        }
        if !self.role.is_empty() {
            form.role = self.role.clone();
        }
        if let Some(code) = self.status {
            form.status = ApplicationStatus::try_from(code)?;
        }
        if let Some(date) = &self.applied_date {
            form.applied_date = AppliedDate::parse(date)?.date();
        }
        if let Some(notes) = &self.notes {
            form.notes = notes.clone();
        }
        Ok(form)
    }
}
