use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::model::ChatModel;

/// UI theme, persisted as a plain string ("dark" / "light").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a persisted theme string; anything unrecognized falls back to
    /// the default dark theme.
    pub fn parse(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

/// The full session snapshot observed by embedders.
///
/// One explicit state struct instead of ambient globals: the store mutates
/// it through its operations and publishes a clone after every change, so
/// the ingestion loop and any UI layer observe the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub conversations: Vec<Conversation>,
    /// Held by value and persisted independently of the list.
    pub selected: Conversation,
    pub models: Vec<ChatModel>,
    pub api_key: String,
    pub theme: Theme,
    pub show_sidebar: bool,

    // Transient flags, never persisted.
    pub loading: bool,
    pub message_is_streaming: bool,
    pub message_error: bool,
    pub model_error: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            conversations: Vec::new(),
            selected: Conversation::synthesized_default(),
            models: Vec::new(),
            api_key: String::new(),
            theme: Theme::default(),
            show_sidebar: true,
            loading: false,
            message_is_streaming: false,
            message_error: false,
            model_error: false,
        }
    }
}

impl SessionState {
    /// Next conversation id: max existing id + 1, starting at 1.
    pub fn next_conversation_id(&self) -> u32 {
        self.conversations
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}
