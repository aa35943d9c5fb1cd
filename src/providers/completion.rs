use crate::{
    config::LlmConfig,
    error::AnalysisError,
    models::completion::{CompletionRequest, CompletionResponse},
};
use reqwest::Client;
use std::time::Duration;

/// Client for the remote chat completion endpoint
///
/// Built once at startup and shared behind an `Arc`. Holds no per-call state, so
/// concurrent calls only share reqwest's connection pool.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl CompletionClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http_client: Client, config: &LlmConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Call the chat completion endpoint once
    ///
    /// No retries: a connection error or timeout is `Transport`, a non-2xx
    /// status is `Remote`, and an unexpected body is `Decode`.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AnalysisError> {
        let response = self
            .http_client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(AnalysisError::Transport)?;

        // Check for HTTP errors
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = status.as_u16(),
                model = %request.model,
                "Completion endpoint returned an error"
            );
            return Err(AnalysisError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(AnalysisError::Transport)?;

        serde_json::from_slice(&body)
            .map_err(|e| AnalysisError::Decode(format!("completion response: {}", e)))
    }
}
