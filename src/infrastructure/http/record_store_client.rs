use crate::application::ports::credential_provider::CredentialProvider;
use crate::application::ports::record_store::ApplicationRecordStore;
use crate::domain::entities::ApplicationRecord;
use crate::domain::value_objects::RecordId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const RESOURCE_PATH: &str = "JobApplications";

/// `/JobApplications` リソースに対する HTTP クライアント
///
/// リクエストごとに資格情報を読み出し、ベアラートークンとして付与する。
/// 資格情報がない場合はヘッダーなしで送信し、拒否はバックエンドに任せる。
pub struct HttpApplicationRecordStore {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpApplicationRecordStore {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AppError::ConfigurationError(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        build_url(&self.base_url, RESOURCE_PATH)
    }

    fn item_url(&self, id: RecordId) -> String {
        build_url(&self.base_url, &format!("{RESOURCE_PATH}/{id}"))
    }

    async fn authorized_request(
        &self,
        method: Method,
        url: String,
    ) -> Result<RequestBuilder, AppError> {
        let builder = self.client.request(method, url);
        let token = self.credentials.current_credential().await.map_err(|err| match err {
            AppError::Auth(_) => err,
            other => AppError::Auth(other.to_string()),
        })?;
        match token {
            Some(token) if !token.trim().is_empty() => Ok(builder.bearer_auth(token.trim())),
            _ => {
                debug!("no session credential available, sending request without authorization");
                Ok(builder)
            }
        }
    }
}

#[async_trait]
impl ApplicationRecordStore for HttpApplicationRecordStore {
    async fn list(&self) -> Result<Vec<ApplicationRecord>, AppError> {
        let builder = self
            .authorized_request(Method::GET, self.collection_url())
            .await?;
        request_json(builder).await
    }

    async fn create(&self, record: &ApplicationRecord) -> Result<ApplicationRecord, AppError> {
        // 採番はバックエンドが行う
        let mut body = record.clone();
        body.id = None;
        let builder = self
            .authorized_request(Method::POST, self.collection_url())
            .await?
            .json(&body);
        request_json(builder).await
    }

    async fn update(&self, id: RecordId, record: &ApplicationRecord) -> Result<(), AppError> {
        let builder = self
            .authorized_request(Method::PUT, self.item_url(id))
            .await?
            .json(record);
        request_empty(builder).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), AppError> {
        let builder = self
            .authorized_request(Method::DELETE, self.item_url(id))
            .await?;
        request_empty(builder).await
    }
}

pub(crate) fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

async fn send(builder: RequestBuilder) -> Result<Response, AppError> {
    builder.send().await.map_err(|err| {
        warn!(error = %err, "record store request did not complete");
        AppError::transport_failure()
    })
}

async fn read_body(response: Response) -> Result<(u16, String), AppError> {
    let status = response.status().as_u16();
    let ok = response.status().is_success();
    let body = response.text().await.map_err(|err| {
        warn!(status, error = %err, "failed to read record store response body");
        AppError::transport_failure()
    })?;
    if !ok {
        return Err(AppError::remote(status, error_message(status, &body)));
    }
    Ok((status, body))
}

async fn request_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, AppError> {
    let response = send(builder).await?;
    let (status, body) = read_body(response).await?;
    serde_json::from_str(&body).map_err(|err| {
        warn!(status, error = %err, "record store returned an unreadable body");
        AppError::remote(status, body)
    })
}

async fn request_empty(builder: RequestBuilder) -> Result<(), AppError> {
    let response = send(builder).await?;
    read_body(response).await.map(|_| ())
}

/// エラー応答の本文から表示用のメッセージを取り出す
fn error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return generic_message(status);
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "title", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|value| value.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| generic_message(status)),
        Ok(serde_json::Value::String(message)) => message,
        Ok(_) => generic_message(status),
        Err(_) => trimmed.to_string(),
    }
}

fn generic_message(status: u16) -> String {
    format!("request failed with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        assert_eq!(
            build_url("https://api.example.com/api/", "/JobApplications"),
            "https://api.example.com/api/JobApplications"
        );
        assert_eq!(
            build_url("http://localhost:5000", "JobApplications/3"),
            "http://localhost:5000/JobApplications/3"
        );
    }

    #[test]
    fn error_message_prefers_structured_fields() {
        assert_eq!(
            error_message(400, r#"{"title":"One or more validation errors occurred."}"#),
            "One or more validation errors occurred."
        );
        assert_eq!(error_message(401, r#"{"message":"expired"}"#), "expired");
        assert_eq!(error_message(500, r#""boom""#), "boom");
        assert_eq!(error_message(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(503, "  "), "request failed with status 503");
        assert_eq!(error_message(404, "[]"), "request failed with status 404");
    }
}
