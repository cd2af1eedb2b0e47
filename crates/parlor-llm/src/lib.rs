pub mod backend;
pub mod http;
pub mod notify;
pub mod streaming;

pub use backend::{ChatBackend, ChatRequest, TextStream};
pub use http::HttpChatBackend;
pub use notify::Notifier;
pub use streaming::{decode_byte_stream, text_chunk_stream, Utf8ChunkDecoder};
