//! HTTP を使った LobbyApi 実装
//!
//! ## 責務
//!
//! - `POST /lobby` に `{ type, code }` を送り、`{ content }` を受け取る
//! - `Content-Type` が JSON のレスポンスだけを解釈する（それ以外は無視）
//! - 失敗した人数の問い合わせを設定回数だけ再試行し、それでも失敗したらエラーを返す
//! - 開始コマンドは冪等ではないため再試行しない

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use url::Url;

use crate::{
    domain::{ActionChannelError, LobbyApi, LobbyCode},
    infrastructure::dto::http::{LobbyRequest, LobbyRequestType, LobbyResponse},
};

/// Action channel over HTTP.
pub struct HttpLobbyApi {
    client: reqwest::Client,
    url: Url,
    retries: u32,
    timeout: Duration,
}

impl HttpLobbyApi {
    /// Create a new HttpLobbyApi
    ///
    /// # Arguments
    ///
    /// * `url` - Lobby endpoint (see [`crate::infrastructure::lobby_url`])
    /// * `retries` - Extra attempts after a failed player count query
    /// * `timeout` - Per-attempt timeout
    pub fn new(url: Url, retries: u32, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            retries,
            timeout,
        }
    }

    async fn post(
        &self,
        request: &LobbyRequest,
        retries: u32,
    ) -> Result<Option<LobbyResponse>, ActionChannelError> {
        let mut attempt = 0;
        loop {
            match self.post_once(request).await {
                Ok(response) => return Ok(response),
                Err(e @ ActionChannelError::InvalidResponse(_)) => return Err(e),
                Err(e) if attempt < retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Lobby request {:?} failed: {} (retry {}/{})",
                        request.r#type,
                        e,
                        attempt,
                        retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post_once(
        &self,
        request: &LobbyRequest,
    ) -> Result<Option<LobbyResponse>, ActionChannelError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ActionChannelError::UnexpectedStatus(status.as_u16()));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if !is_json {
            tracing::debug!("Ignoring non-JSON lobby response");
            return Ok(None);
        }

        let body = response.text().await.map_err(map_request_error)?;
        tracing::debug!("Lobby response: {}", body);
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ActionChannelError::InvalidResponse(e.to_string()))
    }
}

fn map_request_error(e: reqwest::Error) -> ActionChannelError {
    if e.is_timeout() {
        ActionChannelError::Timeout
    } else {
        ActionChannelError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LobbyApi for HttpLobbyApi {
    async fn player_count(&self, code: &LobbyCode) -> Result<Option<i64>, ActionChannelError> {
        let request = LobbyRequest {
            r#type: LobbyRequestType::NumPlayers,
            code: code.as_str().to_string(),
        };
        let Some(response) = self.post(&request, self.retries).await? else {
            return Ok(None);
        };
        response.content.as_i64().map(Some).ok_or_else(|| {
            ActionChannelError::InvalidResponse(format!(
                "player count is not an integer: {}",
                response.content
            ))
        })
    }

    async fn start(&self, code: &LobbyCode) -> Result<(), ActionChannelError> {
        let request = LobbyRequest {
            r#type: LobbyRequestType::Start,
            code: code.as_str().to_string(),
        };
        // Not idempotent: a start that timed out may already have been applied.
        self.post(&request, 0).await?;
        Ok(())
    }
}
