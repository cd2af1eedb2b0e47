use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;

use parlor_llm::{ChatBackend, ChatRequest, Notifier};
use parlor_persist::{keys, normalize_conversation, normalize_history, KeyValueStore, Loaded};
use parlor_types::{ChatModel, Conversation, Message, SessionState, Theme};

use crate::ingest::ReplyAccumulator;

/// Single source of truth for the conversation list and the active
/// selection.
///
/// Every mutating operation computes the new value, replaces it in memory,
/// writes the same value to durable storage, and publishes a snapshot to
/// subscribers. Mutation goes through `&mut self`, so a single owner drives
/// all transitions; the store does not guard against two concurrent sends,
/// embedders gate sending on `message_is_streaming` instead.
pub struct SessionStore {
    state: SessionState,
    storage: Arc<dyn KeyValueStore>,
    backend: Arc<dyn ChatBackend>,
    notifier: Notifier,
    snapshot_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        backend: Arc<dyn ChatBackend>,
        notifier: Notifier,
    ) -> Self {
        let state = SessionState::default();
        let (snapshot_tx, _) = watch::channel(state.clone());

        Self {
            state,
            storage,
            backend,
            notifier,
            snapshot_tx,
        }
    }

    /// Startup reconciliation: restore theme, credential, conversation list,
    /// and selection from durable storage (each independently optional),
    /// repairing stale shapes, then fetch the model directory with whatever
    /// credential was loaded.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        backend: Arc<dyn ChatBackend>,
        notifier: Notifier,
    ) -> Self {
        let mut store = Self::new(storage, backend, notifier);
        store.restore_from_storage();
        store.fetch_models().await;
        store
    }

    /// Current session snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Observe every published snapshot (latest-value semantics).
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshot_tx.subscribe()
    }

    // ------------------------------------------------------------------
    // Conversation store operations
    // ------------------------------------------------------------------

    /// Create, select, and persist a fresh conversation. Returns its id.
    pub fn new_conversation(&mut self) -> u32 {
        let id = self.state.next_conversation_id();
        let conversation = Conversation::new(id, format!("Chat Room {}", id));

        self.state.conversations.push(conversation.clone());
        self.state.selected = conversation;
        self.persist_history();
        self.persist_selected();

        self.state.loading = false;
        self.publish();
        id
    }

    /// Set the selection; only the selection is persisted. Unknown ids are
    /// ignored.
    pub fn select_conversation(&mut self, id: u32) {
        if let Some(conversation) = self.state.conversations.iter().find(|c| c.id == id) {
            self.state.selected = conversation.clone();
            self.persist_selected();
            self.publish();
        }
    }

    pub fn rename_conversation(&mut self, id: u32, name: impl Into<String>) {
        let name = name.into();
        self.replace_by_id(id, |conversation| conversation.name = name);
    }

    pub fn change_model(&mut self, id: u32, model: ChatModel) {
        self.replace_by_id(id, |conversation| conversation.model = model);
    }

    /// Remove a conversation. Selection moves to the last remaining entry;
    /// deleting the final conversation selects a synthesized default and
    /// removes the persisted selection key instead of overwriting it.
    pub fn delete_conversation(&mut self, id: u32) {
        self.state.conversations.retain(|c| c.id != id);
        self.persist_history();

        match self.state.conversations.last() {
            Some(last) => {
                self.state.selected = last.clone();
                self.persist_selected();
            }
            None => {
                self.state.selected = Conversation::synthesized_default();
                if let Err(e) = self.storage.remove(keys::SELECTED_CONVERSATION) {
                    tracing::warn!(
                        "Storage remove failed for {}: {}",
                        keys::SELECTED_CONVERSATION,
                        e
                    );
                }
            }
        }
        self.publish();
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.state.api_key = api_key.into();
        self.write_key(keys::API_KEY, &self.state.api_key);
        self.publish();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.write_key(keys::THEME, theme.as_str());
        self.publish();
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.show_sidebar = !self.state.show_sidebar;
        self.publish();
    }

    // ------------------------------------------------------------------
    // Streaming ingestion loop
    // ------------------------------------------------------------------

    /// Submit a message and materialize the assistant reply incrementally.
    ///
    /// With `resend` the previous trailing message is dropped first, so a
    /// response can be regenerated in place. Failures never surface as
    /// errors: they raise `message_error` and fire the webhook notifier,
    /// leaving the conversation list unpersisted.
    pub async fn send_message(&mut self, message: Message, resend: bool) {
        if resend {
            self.state.selected.messages.pop();
        }
        self.state.selected.messages.push(message);

        self.state.loading = true;
        self.state.message_is_streaming = true;
        self.state.message_error = false;
        self.publish();

        let request = ChatRequest::new(
            self.state.selected.model.clone(),
            self.state.selected.messages.clone(),
            self.state.api_key.clone(),
        );

        let mut chunks = match self.backend.send_chat(request).await {
            Ok(stream) => stream,
            Err(e) => {
                self.fail_send(format!("Chat request failed: {}", e));
                return;
            }
        };

        self.state.loading = false;
        self.publish();

        let mut reply = ReplyAccumulator::new();
        let mut stream_error = None;
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(text) => {
                    reply.apply(&mut self.state.selected, &text);
                    self.publish();
                }
                // No cancellation or retry exists; a transport error just
                // ends consumption.
                Err(e) => {
                    tracing::warn!("Reply stream ended early: {}", e);
                    stream_error = Some(e);
                    break;
                }
            }
        }

        if reply.is_empty() {
            let reason = match stream_error {
                Some(e) => format!("Chat reply stream failed before any text: {}", e),
                None => "Chat request returned an empty reply".to_string(),
            };
            self.fail_send(reason);
            return;
        }

        self.persist_selected();

        let updated = self.state.selected.clone();
        match self
            .state
            .conversations
            .iter_mut()
            .find(|c| c.id == updated.id)
        {
            Some(entry) => *entry = updated,
            None => self.state.conversations.push(updated),
        }
        self.persist_history();

        self.state.message_is_streaming = false;
        self.publish();
    }

    // ------------------------------------------------------------------
    // Model directory fetch
    // ------------------------------------------------------------------

    /// One-shot directory fetch. Failure raises `model_error` and leaves the
    /// list at its last-known value; success replaces the list wholesale.
    pub async fn fetch_models(&mut self) {
        match self.backend.list_models(&self.state.api_key).await {
            Ok(models) => {
                self.state.models = models;
            }
            Err(e) => {
                tracing::warn!("Model directory fetch failed: {}", e);
                self.state.model_error = true;
            }
        }
        self.publish();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn replace_by_id(&mut self, id: u32, mutate: impl FnOnce(&mut Conversation)) {
        let updated = match self.state.conversations.iter_mut().find(|c| c.id == id) {
            Some(entry) => {
                mutate(entry);
                entry.clone()
            }
            None => return,
        };

        self.state.selected = updated;
        self.persist_history();
        self.persist_selected();
        self.publish();
    }

    fn fail_send(&mut self, reason: String) {
        self.state.loading = false;
        self.state.message_is_streaming = false;
        self.state.message_error = true;
        self.publish();
        self.notifier.notify(reason);
    }

    fn restore_from_storage(&mut self) {
        if let Some(theme) = self.read_key(keys::THEME) {
            self.state.theme = Theme::parse(&theme);
        }
        if let Some(api_key) = self.read_key(keys::API_KEY) {
            self.state.api_key = api_key;
        }

        if let Some(raw) = self.read_key(keys::CONVERSATION_HISTORY) {
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => {
                    let loaded = normalize_history(value);
                    let repaired = loaded.iter().filter(|l| l.was_repaired()).count();
                    if repaired > 0 {
                        tracing::warn!("Repaired {} persisted conversation(s)", repaired);
                    }
                    self.state.conversations =
                        loaded.into_iter().map(Loaded::into_inner).collect();
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable conversation history: {}", e);
                }
            }
        }

        let selected = self
            .read_key(keys::SELECTED_CONVERSATION)
            .and_then(|raw| match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => {
                    let loaded = normalize_conversation(value);
                    if loaded.was_repaired() {
                        tracing::warn!("Repaired persisted selection");
                    }
                    Some(loaded.into_inner())
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable selection: {}", e);
                    None
                }
            });
        self.state.selected = selected.unwrap_or_else(Conversation::synthesized_default);

        self.publish();
    }

    fn persist_history(&self) {
        match serde_json::to_string(&self.state.conversations) {
            Ok(json) => self.write_key(keys::CONVERSATION_HISTORY, &json),
            Err(e) => tracing::warn!("Failed to serialize conversation history: {}", e),
        }
    }

    fn persist_selected(&self) {
        match serde_json::to_string(&self.state.selected) {
            Ok(json) => self.write_key(keys::SELECTED_CONVERSATION, &json),
            Err(e) => tracing::warn!("Failed to serialize selection: {}", e),
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Storage read failed for {}: {}", key, e);
                None
            }
        }
    }

    // Storage failures are logged and swallowed; the next mutation rewrites
    // the full value anyway (last-write-wins store).
    fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!("Storage write failed for {}: {}", key, e);
        }
    }

    fn publish(&self) {
        // Send only fails when no receiver exists.
        let _ = self.snapshot_tx.send(self.state.clone());
    }
}
