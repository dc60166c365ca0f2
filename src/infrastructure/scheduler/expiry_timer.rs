use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// 一度だけ発火する取り消し可能なタイマー
///
/// 再設定すると前回のタスクは中断される。
#[derive(Default)]
pub struct ExpiryTimer {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiryTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `after` 経過後に `on_expire` を実行する。tokio ランタイム上で呼ぶこと。
    pub fn rearm<F>(&self, after: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let next = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            on_expire.await;
        });
        if let Some(previous) = self.lock().replace(next) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(previous) = self.lock().take() {
            previous.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
