use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_DISPLAY_DURATION_MS: u64 = 3_000;
const DEFAULT_TOKEN_ENV_VAR: &str = "JOB_TRACKER_TOKEN";
const DEFAULT_LOG_FILTER: &str = "job_tracker=debug,job_tracker_lib=debug,info";

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    #[default]
    None,
    Env,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub notifications: NotificationConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub display_duration_ms: u64,
    #[serde(default)]
    pub surface_validation_errors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub preferences_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub credential_source: CredentialSource,
    pub token_env_var: String,
    pub keyring_service: String,
    pub keyring_account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

/// フロントエンドと共有する config.json の形
#[derive(Debug, Deserialize)]
struct ClientConfigFile {
    #[serde(rename = "API_BASE_URL")]
    api_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                request_timeout_secs: None,
            },
            notifications: NotificationConfig {
                display_duration_ms: DEFAULT_DISPLAY_DURATION_MS,
                surface_validation_errors: false,
            },
            storage: StorageConfig {
                preferences_path: default_preferences_path(),
            },
            auth: AuthConfig {
                credential_source: CredentialSource::None,
                token_env_var: DEFAULT_TOKEN_ENV_VAR.to_string(),
                keyring_service: "job-tracker".to_string(),
                keyring_account: "api-token".to_string(),
            },
            logging: LoggingConfig {
                filter: DEFAULT_LOG_FILTER.to_string(),
                json: false,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 環境変数の読み出し元を差し替えて設定を構築する
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("JOB_TRACKER_API_BASE_URL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed.to_string();
            }
        }
        if let Some(value) = lookup("JOB_TRACKER_REQUEST_TIMEOUT_SECS").and_then(|v| parse_u64(&v)) {
            cfg.api.request_timeout_secs = if value == 0 { None } else { Some(value) };
        }
        if let Some(value) = lookup("JOB_TRACKER_NOTIFICATION_MS").and_then(|v| parse_u64(&v)) {
            cfg.notifications.display_duration_ms = value.max(1);
        }
        if let Some(v) = lookup("JOB_TRACKER_SURFACE_VALIDATION_ERRORS") {
            cfg.notifications.surface_validation_errors =
                parse_bool(&v, cfg.notifications.surface_validation_errors);
        }
        if let Some(v) = lookup("JOB_TRACKER_PREFERENCES_PATH") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.storage.preferences_path = PathBuf::from(trimmed);
            }
        }
        if let Some(v) = lookup("JOB_TRACKER_CREDENTIAL_SOURCE") {
            cfg.auth.credential_source = match v.trim().to_ascii_lowercase().as_str() {
                "env" => CredentialSource::Env,
                "keyring" => CredentialSource::Keyring,
                _ => CredentialSource::None,
            };
        }
        if let Some(v) = lookup("JOB_TRACKER_TOKEN_ENV_VAR") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.auth.token_env_var = trimmed.to_string();
            }
        }
        if let Some(v) = lookup("JOB_TRACKER_LOG_FILTER") {
            cfg.logging.filter = v;
        }
        if let Some(v) = lookup("JOB_TRACKER_JSON_LOGS") {
            cfg.logging.json = parse_bool(&v, cfg.logging.json);
        }

        cfg
    }

    /// `{ "API_BASE_URL": "..." }` 形式のファイルから API の接続先を上書きする
    pub fn apply_client_config_file(&mut self, path: &Path) -> Result<(), AppError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            AppError::ConfigurationError(format!(
                "Failed to load {}: {}",
                path.display(),
                err
            ))
        })?;
        self.apply_client_config_json(&raw)
    }

    pub fn apply_client_config_json(&mut self, raw: &str) -> Result<(), AppError> {
        let file: ClientConfigFile = serde_json::from_str(raw)
            .map_err(|err| AppError::ConfigurationError(err.to_string()))?;
        match file.api_base_url {
            Some(url) if !url.trim().is_empty() => {
                self.api.base_url = url.trim().to_string();
                Ok(())
            }
            _ => Err(AppError::ConfigurationError(
                "API_BASE_URL is missing in config.json".to_string(),
            )),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(format!("API base_url is not a valid URL: {}", self.api.base_url));
        }
        if self.notifications.display_duration_ms == 0 {
            return Err("Notification display_duration_ms must be greater than 0".to_string());
        }
        if self.auth.credential_source == CredentialSource::Env
            && self.auth.token_env_var.trim().is_empty()
        {
            return Err("Auth token_env_var must be set when credential_source is env".to_string());
        }
        Ok(())
    }
}

fn default_preferences_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("./data"))
        .join("job-tracker")
        .join("preferences.json")
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.notifications.display_duration_ms, 3_000);
        assert!(!cfg.notifications.surface_validation_errors);
        assert!(cfg.api.request_timeout_secs.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn env_overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("JOB_TRACKER_API_BASE_URL", " https://api.example.com "),
            ("JOB_TRACKER_REQUEST_TIMEOUT_SECS", "15"),
            ("JOB_TRACKER_SURFACE_VALIDATION_ERRORS", "yes"),
            ("JOB_TRACKER_CREDENTIAL_SOURCE", "keyring"),
            ("JOB_TRACKER_JSON_LOGS", "on"),
        ]));
        assert_eq!(cfg.api.base_url, "https://api.example.com");
        assert_eq!(cfg.api.request_timeout_secs, Some(15));
        assert!(cfg.notifications.surface_validation_errors);
        assert_eq!(cfg.auth.credential_source, CredentialSource::Keyring);
        assert!(cfg.logging.json);
    }

    #[test]
    fn zero_timeout_disables_the_timeout() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("JOB_TRACKER_REQUEST_TIMEOUT_SECS", "0")]));
        assert!(cfg.api.request_timeout_secs.is_none());
    }

    #[test]
    fn client_config_json_requires_base_url() {
        let mut cfg = AppConfig::default();
        cfg.apply_client_config_json(r#"{"API_BASE_URL":"https://jobs.example.com/api"}"#)
            .unwrap();
        assert_eq!(cfg.api.base_url, "https://jobs.example.com/api");

        let err = cfg.apply_client_config_json(r#"{"OTHER":"x"}"#).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "not a url".to_string();
        assert!(cfg.validate().is_err());
    }
}
