pub mod notification_service;
pub mod preference_service;
pub mod sync_service;
pub mod view_projection;

pub use notification_service::NotificationService;
pub use preference_service::PreferenceService;
pub use sync_service::{SyncOptions, SyncOutcome, SyncService};
