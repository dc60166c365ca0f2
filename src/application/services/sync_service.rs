use super::notification_service::NotificationService;
use super::preference_service::PreferenceService;
use super::view_projection;
use crate::application::ports::record_store::ApplicationRecordStore;
use crate::domain::entities::{
    ApplicationForm, ApplicationRecord, DeletionGate, EditDraft, EditSession,
};
use crate::domain::value_objects::{RecordId, SortOrder, StatusFilter, ViewPreferences};
use crate::shared::error::AppError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub mod messages {
    pub const ADDED: &str = "Application added";
    pub const UPDATED: &str = "Application updated";
    pub const DELETED: &str = "Application deleted";
    pub const LOAD_FAILED: &str = "Failed to load applications";
    pub const ADD_FAILED: &str = "Failed to add application";
    pub const UPDATE_FAILED: &str = "Failed to update application";
    pub const DELETE_FAILED: &str = "Failed to delete application";
    pub const VALIDATION_FAILED: &str = "Company and role are required";
}

/// 同期操作の結果。リモートの失敗は通知に変換済みで、呼び出し側には伝播しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// リモート呼び出しが成功し、ローカルの状態に反映した
    Applied,
    /// リモート呼び出しが失敗した（エラー通知済み、状態は変更なし）
    RemoteFailed,
    /// 入力検証で弾いた（リモート呼び出しなし）
    Rejected,
    /// busy 中、または対象がないため何もしなかった
    Ignored,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// 入力検証の失敗を通知として表示するか（既定では黙って無視する）
    pub surface_validation_errors: bool,
}

#[derive(Debug, Default)]
struct TrackerState {
    records: Vec<ApplicationRecord>,
    preferences: ViewPreferences,
    add_form: ApplicationForm,
    edit_session: EditSession,
    deletion_gate: DeletionGate,
}

/// busy フラグを保持している間だけ存在するガード
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// 応募レコードの同期エンジン
///
/// メモリ上のコレクションを唯一所有し、追加・更新・削除はすべて
/// リモートストアを呼んでから反映する。busy フラグで変更系の呼び出しを直列化する。
pub struct SyncService {
    store: Arc<dyn ApplicationRecordStore>,
    preferences: PreferenceService,
    notifications: Arc<NotificationService>,
    options: SyncOptions,
    state: RwLock<TrackerState>,
    busy: AtomicBool,
}

impl SyncService {
    /// 永続化された表示設定を読み込んでエンジンを構築する
    pub async fn initialize(
        store: Arc<dyn ApplicationRecordStore>,
        preferences: PreferenceService,
        notifications: Arc<NotificationService>,
        options: SyncOptions,
    ) -> Self {
        let restored = preferences.load().await;
        debug!(
            filter = %restored.filter_status,
            sort = %restored.sort_order,
            "view preferences restored"
        );
        Self {
            store,
            preferences,
            notifications,
            options,
            state: RwLock::new(TrackerState {
                preferences: restored,
                ..TrackerState::default()
            }),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn notifications(&self) -> &Arc<NotificationService> {
        &self.notifications
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: &self.busy })
    }

    // ---- Load ----

    pub async fn load(&self) -> SyncOutcome {
        let Some(_busy) = self.try_begin() else {
            debug!("load ignored: engine is busy");
            return SyncOutcome::Ignored;
        };

        match self.store.list().await {
            Ok(records) => {
                info!(count = records.len(), "applications loaded");
                self.state.write().await.records = records;
                SyncOutcome::Applied
            }
            Err(err) => {
                log_remote_failure("load", &err);
                self.notifications.error(messages::LOAD_FAILED).await;
                SyncOutcome::RemoteFailed
            }
        }
    }

    // ---- Add ----

    pub async fn add_form(&self) -> ApplicationForm {
        self.state.read().await.add_form.clone()
    }

    pub async fn edit_add_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut ApplicationForm),
    {
        edit(&mut self.state.write().await.add_form);
    }

    /// 入力をフォームに反映してから送信する
    pub async fn add(&self, input: ApplicationForm) -> SyncOutcome {
        let Some(busy) = self.try_begin() else {
            debug!("add ignored: engine is busy");
            return SyncOutcome::Ignored;
        };
        self.state.write().await.add_form = input.clone();
        self.create_from(input, busy).await
    }

    pub async fn submit_add_form(&self) -> SyncOutcome {
        let Some(busy) = self.try_begin() else {
            debug!("add ignored: engine is busy");
            return SyncOutcome::Ignored;
        };
        let form = self.add_form().await;
        self.create_from(form, busy).await
    }

    /// busy を保持したまま `form` の内容でレコードを作成する
    async fn create_from(&self, form: ApplicationForm, busy: BusyGuard<'_>) -> SyncOutcome {
        let record = match form.to_record(None) {
            Ok(record) => record,
            Err(err) => {
                drop(busy);
                debug!(reason = %err, "add rejected by validation");
                self.report_validation_failure().await;
                return SyncOutcome::Rejected;
            }
        };

        match self.store.create(&record).await {
            Ok(saved) => {
                info!(id = ?saved.id, company = %saved.company, "application added");
                {
                    let mut state = self.state.write().await;
                    state.records.push(saved);
                    // 送信中に書き換えられたフォームはそのまま残す
                    if state.add_form == form {
                        state.add_form = ApplicationForm::default();
                    }
                }
                self.notifications.success(messages::ADDED).await;
                SyncOutcome::Applied
            }
            Err(err) => {
                log_remote_failure("add", &err);
                self.notifications.error(messages::ADD_FAILED).await;
                SyncOutcome::RemoteFailed
            }
        }
    }

    // ---- Inline edit ----

    /// コレクション内のレコードの編集を開始する。見つからなければ `false`。
    pub async fn start_edit(&self, id: RecordId) -> bool {
        let mut state = self.state.write().await;
        let Some(record) = state.records.iter().find(|r| r.has_id(id)).cloned() else {
            debug!(%id, "edit not started: record not found");
            return false;
        };
        state.edit_session.start(&record)
    }

    pub async fn edit_draft<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut ApplicationForm),
    {
        let mut state = self.state.write().await;
        match state.edit_session.draft_mut() {
            Some(draft) => {
                edit(&mut draft.form);
                true
            }
            None => false,
        }
    }

    pub async fn edit_session(&self) -> EditSession {
        self.state.read().await.edit_session.clone()
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.edit_session.cancel();
    }

    /// 編集中のドラフトを保存する
    ///
    /// 成功時は送信した内容でローカルのレコードを置き換える（再取得はしない）。
    /// 失敗時はコレクションもドラフトもそのまま残す。
    pub async fn save_edit(&self) -> SyncOutcome {
        let Some(EditDraft { target_id, form }) =
            self.state.read().await.edit_session.draft().cloned()
        else {
            return SyncOutcome::Ignored;
        };

        let record = match form.to_record(Some(target_id)) {
            Ok(record) => record,
            Err(err) => {
                debug!(%target_id, reason = %err, "update rejected by validation");
                self.report_validation_failure().await;
                return SyncOutcome::Rejected;
            }
        };

        let Some(_busy) = self.try_begin() else {
            debug!("update ignored: engine is busy");
            return SyncOutcome::Ignored;
        };

        // ローカルに対象が存在するかは事前に確認しない（削除済みならサーバー側で失敗する）
        match self.store.update(target_id, &record).await {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    let mut replaced = false;
                    for existing in state.records.iter_mut().filter(|r| r.has_id(target_id)) {
                        *existing = record.clone();
                        replaced = true;
                    }
                    if !replaced {
                        debug!(%target_id, "updated record is no longer in the collection");
                    }
                    // 送信中に別のレコードの編集が始まっていれば、そのドラフトは残す
                    if state.edit_session.draft().map(|draft| draft.target_id) == Some(target_id) {
                        state.edit_session.cancel();
                    }
                }
                info!(%target_id, "application updated");
                self.notifications.success(messages::UPDATED).await;
                SyncOutcome::Applied
            }
            Err(err) => {
                log_remote_failure("update", &err);
                self.notifications.error(messages::UPDATE_FAILED).await;
                SyncOutcome::RemoteFailed
            }
        }
    }

    // ---- Delete ----

    pub async fn request_delete(&self, id: RecordId) {
        self.state.write().await.deletion_gate.request(id);
    }

    pub async fn cancel_delete(&self) {
        self.state.write().await.deletion_gate.cancel();
    }

    pub async fn pending_deletion(&self) -> Option<RecordId> {
        self.state.read().await.deletion_gate.pending()
    }

    /// 確認待ちの削除を実行する。結果にかかわらず確認待ちは解除される。
    pub async fn confirm_delete(&self) -> SyncOutcome {
        let Some(id) = self.pending_deletion().await else {
            return SyncOutcome::Ignored;
        };

        let Some(_busy) = self.try_begin() else {
            debug!("delete ignored: engine is busy");
            return SyncOutcome::Ignored;
        };

        match self.store.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.records.retain(|record| !record.has_id(id));
                state.deletion_gate.cancel();
                drop(state);
                info!(%id, "application deleted");
                self.notifications.success(messages::DELETED).await;
                SyncOutcome::Applied
            }
            Err(err) => {
                log_remote_failure("delete", &err);
                self.state.write().await.deletion_gate.cancel();
                self.notifications.error(messages::DELETE_FAILED).await;
                SyncOutcome::RemoteFailed
            }
        }
    }

    // ---- Derived view ----

    pub async fn records(&self) -> Vec<ApplicationRecord> {
        self.state.read().await.records.clone()
    }

    pub async fn preferences(&self) -> ViewPreferences {
        self.state.read().await.preferences.clone()
    }

    /// 現在の絞り込み・並び順で投影した一覧
    pub async fn view(&self) -> Vec<ApplicationRecord> {
        let state = self.state.read().await;
        view_projection::project(&state.records, &state.preferences)
    }

    pub async fn set_filter_status(&self, filter: StatusFilter) {
        self.state.write().await.preferences.filter_status = filter;
        if let Err(err) = self.preferences.save_filter_status(filter).await {
            warn!(error = %err, "failed to persist filterStatus");
        }
    }

    pub async fn set_sort_order(&self, order: SortOrder) {
        self.state.write().await.preferences.sort_order = order.clone();
        if let Err(err) = self.preferences.save_sort_order(&order).await {
            warn!(error = %err, "failed to persist sortOrder");
        }
    }

    async fn report_validation_failure(&self) {
        if self.options.surface_validation_errors {
            self.notifications.error(messages::VALIDATION_FAILED).await;
        }
    }
}

fn log_remote_failure(operation: &str, err: &AppError) {
    match err {
        AppError::Remote { status, message } => {
            warn!(operation, status, message = %message, "remote call failed");
        }
        other => warn!(operation, error = %other, "remote call failed"),
    }
}
