// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible APIs.
//!
//! Provides [`OpenAiClient`] which handles request construction, bearer
//! authentication, and transient error retry for the embeddings and chat
//! completion endpoints.

use std::time::Duration;

use mnema_core::MnemaError;
use mnema_config::OpenAiConfig;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, ChatRequest, ChatResponse, EmbeddingsRequest, EmbeddingsResponse,
};

/// HTTP client for an OpenAI-compatible API.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Creates a new client against `base_url` (no trailing slash).
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self, MnemaError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| MnemaError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| MnemaError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Creates a client from the `[openai]` configuration section.
    /// The API key must be present.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, MnemaError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| MnemaError::Config("openai.api_key is not set".to_string()))?;
        Self::new(api_key, config.base_url.clone())
    }

    /// `POST /embeddings`.
    pub async fn embed(&self, request: &EmbeddingsRequest) -> Result<EmbeddingsResponse, MnemaError> {
        self.post_json("/embeddings", request).await
    }

    /// `POST /chat/completions`.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, MnemaError> {
        self.post_json("/chat/completions", request).await
    }

    /// Sends a JSON request and parses the JSON reply.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second
    /// delay.
    async fn post_json<Req, Resp>(&self, endpoint: &str, request: &Req) -> Result<Resp, MnemaError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{endpoint}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, endpoint, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| MnemaError::Internal(format!("HTTP request failed: {e}")))?;

            let status = response.status();
            debug!(status = %status, endpoint, attempt, "response received");

            if status.is_success() {
                let body = response
                    .text()
                    .await
                    .map_err(|e| MnemaError::Internal(format!("failed to read response body: {e}")))?;
                return serde_json::from_str(&body)
                    .map_err(|e| MnemaError::Internal(format!("failed to parse API response: {e}")));
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(MnemaError::Internal(format!("API returned {status}: {body}")));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("API error ({}): {}", api_err.error.type_, api_err.error.message)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(MnemaError::Internal(message));
        }

        Err(last_error
            .unwrap_or_else(|| MnemaError::Internal("request failed after retries".into())))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
