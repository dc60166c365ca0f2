pub mod application_form;
pub mod application_record;
pub mod deletion_gate;
pub mod edit_session;
pub mod notification;

pub use application_form::{ApplicationForm, FormValidationError};
pub use application_record::ApplicationRecord;
pub use deletion_gate::DeletionGate;
pub use edit_session::{EditDraft, EditSession};
pub use notification::{Notification, NotificationKind};
