//! # Parlor
//!
//! Headless multi-conversation chat session core: hold multiple named
//! conversations with a language-model backend, switch models per
//! conversation, and observe assistant replies incrementally as they stream
//! in.
//!
//! ## Overview
//!
//! Parlor gives an embedding program (CLI, TUI, GUI, service) the state and
//! behavior of a chat UI without the rendering:
//!
//! - **Conversation store** with create/select/rename/delete/change-model,
//!   mirrored to durable key-value storage on every mutation
//! - **Streaming ingestion** that folds a chunked reply body into the
//!   trailing assistant message, chunk by chunk
//! - **Model directory fetch** populating the list of selectable models
//! - **Startup reconciliation** that repairs stale persisted snapshots
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parlor::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Arc::new(FileStore::new("./parlor-data")?);
//!     let backend = Arc::new(HttpChatBackend::new("http://localhost:3000")?);
//!
//!     let mut store = SessionStore::load(storage, backend, Notifier::disabled()).await;
//!
//!     store.new_conversation();
//!     store.send_message(Message::user("Hello!"), false).await;
//!
//!     let reply = store.state().selected.last_message().unwrap();
//!     println!("{}", reply.content);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Parlor is organized into focused crates:
//!
//! - **`parlor-session`**: conversation store and streaming ingestion loop
//! - **`parlor-llm`**: backend boundary, HTTP client, chunk decoding
//! - **`parlor-persist`**: durable key-value storage and normalization
//! - **`parlor-types`**: the shared data model
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use parlor_types::{ChatModel, Conversation, Message, Role, SessionState, Theme};

pub use parlor_llm::{
    ChatBackend, ChatRequest, HttpChatBackend, Notifier, TextStream, Utf8ChunkDecoder,
};

pub use parlor_persist::{
    keys, FileStore, KeyValueStore, Loaded, MemoryStore, PersistError,
};

pub use parlor_session::{ReplyAccumulator, SessionStore};
