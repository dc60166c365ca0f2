use crate::domain::entities::{Notification, NotificationKind};
use crate::infrastructure::scheduler::ExpiryTimer;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// 単一スロットの通知キュー
///
/// 新しい通知は表示中のものを置き換え、失効タイマーを張り直す。
/// 同期エンジンの busy フラグとはロックを共有しない。
pub struct NotificationService {
    slot: Arc<Mutex<Option<Notification>>>,
    timer: ExpiryTimer,
    display_duration: Duration,
    sequence: AtomicU64,
}

impl NotificationService {
    pub fn new(display_duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            timer: ExpiryTimer::new(),
            display_duration,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }

    pub async fn emit(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let expires_at = Utc::now()
            + chrono::Duration::from_std(self.display_duration)
                .unwrap_or_else(|_| chrono::Duration::zero());
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            expires_at,
        };

        {
            let mut slot = self.slot.lock().await;
            *slot = Some(notification.clone());
        }

        let slot = Arc::clone(&self.slot);
        self.timer.rearm(self.display_duration, async move {
            let mut current = slot.lock().await;
            // 中断が間に合わなかった古いタイマーが新しい通知を消さないようにする
            if current.as_ref().map(|n| n.id) == Some(id) {
                *current = None;
                debug!(notification_id = id, "notification expired");
            }
        });

        debug!(notification_id = id, ?kind, message = %notification.message, "notification emitted");
        notification
    }

    pub async fn success(&self, message: impl Into<String>) -> Notification {
        self.emit(message, NotificationKind::Success).await
    }

    pub async fn error(&self, message: impl Into<String>) -> Notification {
        self.emit(message, NotificationKind::Error).await
    }

    pub async fn current(&self) -> Option<Notification> {
        self.slot.lock().await.clone()
    }

    pub async fn dismiss(&self) {
        self.timer.cancel();
        *self.slot.lock().await = None;
    }
}
