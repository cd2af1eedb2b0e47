use serde::{Deserialize, Serialize};

/// Default model attached to freshly created conversations and used to
/// repair conversations whose persisted model reference is missing.
pub const DEFAULT_MODEL_ID: &str = "gpt-3.5-turbo";

/// A selectable backend model, as advertised by the model listing endpoint.
///
/// Treated as an opaque value bound to a conversation; no validation against
/// a canonical registry happens beyond what the directory fetch returns.
/// Serialized camelCase (`tokenLimit`) to match the stored/wire schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatModel {
    pub id: String,
    pub name: String,
    pub token_limit: u32,
}

impl ChatModel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, token_limit: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            token_limit,
        }
    }
}

impl Default for ChatModel {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_ID, "GPT-3.5", 4096)
    }
}
