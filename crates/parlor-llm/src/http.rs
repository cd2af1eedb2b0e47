// HTTP implementation of the chat backend (direct reqwest, no SDK)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use parlor_types::ChatModel;

use crate::backend::{ChatBackend, ChatRequest, TextStream};
use crate::streaming::text_chunk_stream;

/// Chat backend over plain HTTP.
///
/// Talks to two endpoints relative to the base URL: `/api/chat` (chunked
/// text reply) and `/api/models` (JSON model directory). The credential
/// travels in the request body, matching the stored schema, not in a header.
pub struct HttpChatBackend {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_chat(&self, request: ChatRequest) -> Result<TextStream> {
        let response = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to send chat request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat endpoint error ({}): {}", status, error_text);
        }

        Ok(text_chunk_stream(response))
    }

    async fn list_models(&self, key: &str) -> Result<Vec<ChatModel>> {
        let response = self
            .http_client
            .post(format!("{}/api/models", self.base_url))
            .json(&serde_json::json!({ "key": key }))
            .send()
            .await
            .context("Failed to send model listing request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Model listing error ({}): {}", status, error_text);
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse model listing")?;

        if payload.is_null() {
            anyhow::bail!("Model listing returned an empty payload");
        }

        serde_json::from_value(payload).context("Malformed model listing payload")
    }
}
