pub mod application_status;
pub mod applied_date;
pub mod record_id;
pub mod view_preferences;

pub use application_status::ApplicationStatus;
pub use applied_date::AppliedDate;
pub use record_id::RecordId;
pub use view_preferences::{SortOrder, StatusFilter, ViewPreferences};
