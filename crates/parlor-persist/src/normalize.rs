use serde_json::Value;

use parlor_types::{ChatModel, Conversation, Message, Role};

/// Outcome of loading one persisted conversation.
///
/// `Valid` means the stored value matched the current schema exactly;
/// `Repaired` means missing or malformed fields were coerced to defaults
/// (absent model, malformed message shapes, stale schemas from earlier
/// versions). The split lets callers count and log repairs, and lets tests
/// assert on which branch fired.
#[derive(Debug, Clone)]
pub enum Loaded {
    Valid(Conversation),
    Repaired(Conversation),
}

impl Loaded {
    pub fn into_inner(self) -> Conversation {
        match self {
            Loaded::Valid(c) | Loaded::Repaired(c) => c,
        }
    }

    pub fn was_repaired(&self) -> bool {
        matches!(self, Loaded::Repaired(_))
    }
}

/// Validating deserializer for one persisted conversation.
///
/// Tries a strict decode first; anything that fails gets field-by-field
/// repair instead of being dropped, so old snapshots keep loading.
pub fn normalize_conversation(value: Value) -> Loaded {
    if let Ok(conversation) = serde_json::from_value::<Conversation>(value.clone()) {
        return Loaded::Valid(conversation);
    }

    let id = value.get("id").and_then(Value::as_u64).unwrap_or(1) as u32;
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("New Chat")
        .to_string();
    let model = value
        .get("model")
        .cloned()
        .and_then(|m| serde_json::from_value::<ChatModel>(m).ok())
        .unwrap_or_default();
    let messages = value
        .get("messages")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_message).collect())
        .unwrap_or_default();

    Loaded::Repaired(Conversation {
        id,
        name,
        messages,
        model,
    })
}

/// Normalize a persisted conversation list. Non-array payloads yield an
/// empty list rather than an error; entries go through
/// [`normalize_conversation`] one by one.
pub fn normalize_history(value: Value) -> Vec<Loaded> {
    match value {
        Value::Array(items) => items.into_iter().map(normalize_conversation).collect(),
        _ => Vec::new(),
    }
}

fn normalize_message(value: &Value) -> Option<Message> {
    if !value.is_object() {
        return None;
    }

    let role = match value.get("role").and_then(Value::as_str) {
        Some("assistant") => Role::Assistant,
        _ => Role::User,
    };
    let content = value
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(Message { role, content })
}
