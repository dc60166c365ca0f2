use std::fmt;

/// ネットワーク層で応答を受け取れなかった場合のステータス
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;
const TRANSPORT_FAILURE_MESSAGE: &str = "transport failure";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// リモートのレコードストアが失敗を返した、または応答が得られなかった
    Remote { status: u16, message: String },
    ValidationError(String),
    Auth(String),
    Storage(String),
    ConfigurationError(String),
    SerializationError(String),
    DeserializationError(String),
    Internal(String),
}

impl AppError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        AppError::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn transport_failure() -> Self {
        Self::remote(TRANSPORT_FAILURE_STATUS, TRANSPORT_FAILURE_MESSAGE)
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::Remote { .. })
    }

    /// `Remote` の場合のみ HTTP ステータスを返す
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Remote { status, message } => {
                write!(f, "Remote error ({}): {}", status, message)
            }
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::Auth(msg) => write!(f, "Auth error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppError::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DeserializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
