//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use parlor::prelude::*;
//! ```

pub use crate::{
    ChatBackend, ChatModel, ChatRequest, Conversation, FileStore, HttpChatBackend,
    KeyValueStore, MemoryStore, Message, Notifier, Role, SessionState, SessionStore, Theme,
};
