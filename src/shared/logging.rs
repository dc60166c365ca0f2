use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT_LOGGING: Once = Once::new();

/// tracing のグローバルサブスクライバを初期化する（2 回目以降は何もしない）
pub fn init_logging(default_filter: &str, json: bool) {
    INIT_LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let registry = tracing_subscriber::registry().with(filter);

        let result = if json {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_target(false))
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().compact().with_target(true))
                .try_init()
        };

        if result.is_ok() {
            tracing::debug!(json, "logging initialized");
        }
    });
}
