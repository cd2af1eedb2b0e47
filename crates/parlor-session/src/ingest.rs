use parlor_types::{Conversation, Message};

/// Folds decoded reply chunks into a conversation's trailing assistant
/// message.
///
/// The first chunk appends a new assistant message whose content is exactly
/// that chunk, so a reply bubble exists as soon as any text arrives. Every
/// later chunk rewrites the trailing message with the entire buffer
/// accumulated so far instead of appending. The final trailing message is
/// therefore the chunk concatenation regardless of how the transport split
/// the body.
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    buffer: String,
    started: bool,
}

impl ReplyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the next chunk to the conversation. Empty chunks are ignored;
    /// the decoder upstream never emits them.
    pub fn apply(&mut self, conversation: &mut Conversation, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.buffer.push_str(chunk);

        if !self.started {
            self.started = true;
            conversation.messages.push(Message::assistant(chunk));
        } else if let Some(last) = conversation.messages.last_mut() {
            last.content = self.buffer.clone();
        }
    }

    /// Full accumulated reply text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// True until the first non-empty chunk has been applied.
    pub fn is_empty(&self) -> bool {
        !self.started
    }
}
