use super::application_form::ApplicationForm;
use super::application_record::ApplicationRecord;
use crate::domain::value_objects::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub target_id: RecordId,
    pub form: ApplicationForm,
}

/// インライン編集の状態。同時に編集できるのは 1 件だけ。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(EditDraft),
}

impl EditSession {
    /// レコードの内容をドラフトに写して編集を開始する。
    /// 既存のドラフトは破棄される。`id` を持たないレコードは編集できない。
    pub fn start(&mut self, record: &ApplicationRecord) -> bool {
        let Some(target_id) = record.id else {
            return false;
        };
        *self = EditSession::Editing(EditDraft {
            target_id,
            form: ApplicationForm::from_record(record),
        });
        true
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        match self {
            EditSession::Editing(draft) => Some(draft),
            EditSession::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        match self {
            EditSession::Editing(draft) => Some(draft),
            EditSession::Idle => None,
        }
    }
}
