// DTOモジュール
pub mod application_dto;

use crate::application::services::SyncOutcome;
use crate::shared::AppError;
use serde::{Deserialize, Serialize};

// 共通のレスポンス型
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            status: None,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        Self {
            status: error.status(),
            ..Self::failure(error.to_string())
        }
    }

    pub fn from_result(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_app_error(err),
        }
    }
}

/// 同期操作の結果を外部向けの文字列にする
pub fn outcome_label(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Applied => "applied",
        SyncOutcome::RemoteFailed => "remote_failed",
        SyncOutcome::Rejected => "rejected",
        SyncOutcome::Ignored => "ignored",
    }
}

// バリデーショントレイト
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
