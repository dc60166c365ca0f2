use crate::application::ports::preference_store::PreferenceStore;
use crate::domain::value_objects::{SortOrder, StatusFilter, ViewPreferences};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::warn;

pub const FILTER_STATUS_KEY: &str = "filterStatus";
pub const SORT_ORDER_KEY: &str = "sortOrder";

/// 表示設定（絞り込み・並び順）の読み込みと保存
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// 起動時に一度だけ呼ぶ。壊れた値や読み込み失敗は既定値に戻す。
    pub async fn load(&self) -> ViewPreferences {
        let mut prefs = ViewPreferences::default();

        match self.store.get(FILTER_STATUS_KEY).await {
            Ok(Some(raw)) => match StatusFilter::parse(&raw) {
                Some(filter) => prefs.filter_status = filter,
                None => warn!(value = %raw, "ignoring malformed persisted filterStatus"),
            },
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to read persisted filterStatus"),
        }

        match self.store.get(SORT_ORDER_KEY).await {
            Ok(Some(raw)) => {
                let order = SortOrder::from(raw.as_str());
                if order.is_recognized() {
                    prefs.sort_order = order;
                } else {
                    warn!(value = %raw, "ignoring malformed persisted sortOrder");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to read persisted sortOrder"),
        }

        prefs
    }

    pub async fn save_filter_status(&self, filter: StatusFilter) -> Result<(), AppError> {
        self.store
            .set(FILTER_STATUS_KEY, &filter.as_persisted())
            .await
    }

    pub async fn save_sort_order(&self, order: &SortOrder) -> Result<(), AppError> {
        self.store.set(SORT_ORDER_KEY, order.as_str()).await
    }
}
