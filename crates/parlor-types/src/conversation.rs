use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::model::ChatModel;

/// A named, ordered sequence of chat messages bound to one selected model.
///
/// Ids are unique positive integers assigned as `max existing id + 1`.
/// The message sequence alternates user/assistant turns logically, but the
/// type does not enforce alternation; only append and last-element-replace
/// are ever performed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: u32,
    pub name: String,
    pub messages: Vec<Message>,
    pub model: ChatModel,
}

impl Conversation {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            messages: Vec::new(),
            model: ChatModel::default(),
        }
    }

    /// The fallback conversation used when nothing is selected: after
    /// deleting the last remaining conversation, and at startup when no
    /// selection was persisted. It is not part of the conversation list
    /// until the next completed send appends it.
    pub fn synthesized_default() -> Self {
        Self::new(1, "New Chat")
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
