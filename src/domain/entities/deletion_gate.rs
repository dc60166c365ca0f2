use crate::domain::value_objects::RecordId;

/// 破壊的操作（削除）の確認待ち状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletionGate {
    #[default]
    None,
    Pending(RecordId),
}

impl DeletionGate {
    pub fn request(&mut self, id: RecordId) {
        *self = DeletionGate::Pending(id);
    }

    pub fn cancel(&mut self) {
        *self = DeletionGate::None;
    }

    pub fn pending(&self) -> Option<RecordId> {
        match self {
            DeletionGate::Pending(id) => Some(*id),
            DeletionGate::None => None,
        }
    }
}
