use super::application_record::ApplicationRecord;
use crate::domain::value_objects::{ApplicationStatus, AppliedDate, RecordId};
use crate::shared::error::AppError;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("company is required")]
    EmptyCompany,

    #[error("role is required")]
    EmptyRole,
}

impl From<FormValidationError> for AppError {
    fn from(err: FormValidationError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// 追加フォームおよび編集ドラフトの入力値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    pub notes: String,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            company: String::new(),
            role: String::new(),
            status: ApplicationStatus::Applied,
            applied_date: Utc::now().date_naive(),
            notes: String::new(),
        }
    }
}

impl ApplicationForm {
    pub fn from_record(record: &ApplicationRecord) -> Self {
        Self {
            company: record.company.clone(),
            role: record.role.clone(),
            status: record.status,
            applied_date: record.applied_date.date(),
            notes: record.notes.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FormValidationError> {
        if self.company.trim().is_empty() {
            return Err(FormValidationError::EmptyCompany);
        }
        if self.role.trim().is_empty() {
            return Err(FormValidationError::EmptyRole);
        }
        Ok(())
    }

    /// 検証を通った入力から送信用のレコードを組み立てる（テキストはトリム済み）
    pub fn to_record(&self, id: Option<RecordId>) -> Result<ApplicationRecord, FormValidationError> {
        self.validate()?;
        Ok(ApplicationRecord {
            id,
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
            status: self.status,
            applied_date: AppliedDate::from_date(self.applied_date),
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(company: &str, role: &str) -> ApplicationForm {
        ApplicationForm {
            company: company.to_string(),
            role: role.to_string(),
            status: ApplicationStatus::Interview,
            applied_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: "  call back  ".to_string(),
        }
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        assert_eq!(
            form("  ", "Engineer").validate(),
            Err(FormValidationError::EmptyCompany)
        );
        assert_eq!(form("Acme", "\t").validate(), Err(FormValidationError::EmptyRole));
    }

    #[test]
    fn to_record_trims_and_converts_the_date() {
        let record = form(" Acme ", " Engineer ").to_record(None).unwrap();
        assert_eq!(record.company, "Acme");
        assert_eq!(record.role, "Engineer");
        assert_eq!(record.notes, "call back");
        assert_eq!(record.applied_date.to_iso_string(), "2024-03-01T00:00:00.000Z");
        assert_eq!(record.id, None);
    }

    #[test]
    fn default_form_is_blank_and_dated_today() {
        let form = ApplicationForm::default();
        assert!(form.company.is_empty());
        assert!(form.role.is_empty());
        assert!(form.notes.is_empty());
        assert_eq!(form.status, ApplicationStatus::Applied);
        assert_eq!(form.applied_date, Utc::now().date_naive());
    }

    #[test]
    fn validation_error_maps_to_app_error() {
        let err: AppError = FormValidationError::EmptyRole.into();
        assert_eq!(err, AppError::ValidationError("role is required".to_string()));
    }
}
