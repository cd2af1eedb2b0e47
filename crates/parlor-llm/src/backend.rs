use std::pin::Pin;

use anyhow::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;

use parlor_types::{ChatModel, Message};

/// Decoded text chunks of an assistant reply, in arrival order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Wire body of the send endpoint: the conversation's model, the full
/// message history, and the stored credential.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: ChatModel,
    pub messages: Vec<Message>,
    pub key: String,
}

impl ChatRequest {
    pub fn new(model: ChatModel, messages: Vec<Message>, key: impl Into<String>) -> Self {
        Self {
            model,
            messages,
            key: key.into(),
        }
    }
}

/// Trait for the model backend consumed by the session.
///
/// The HTTP implementation lives in this crate; tests drive the session with
/// scripted implementations.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Submit a conversation and stream the assistant reply as text chunks.
    async fn send_chat(&self, request: ChatRequest) -> Result<TextStream>;

    /// One-shot fetch of the selectable model directory.
    async fn list_models(&self, key: &str) -> Result<Vec<ChatModel>>;
}
