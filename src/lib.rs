// モジュール定義
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

pub use application::services::{SyncOptions, SyncOutcome, SyncService};
pub use domain::entities::{ApplicationForm, ApplicationRecord, EditSession, Notification};
pub use domain::value_objects::{
    ApplicationStatus, AppliedDate, RecordId, SortOrder, StatusFilter, ViewPreferences,
};
pub use shared::{AppConfig, AppError, init_logging};
pub use state::AppState;
