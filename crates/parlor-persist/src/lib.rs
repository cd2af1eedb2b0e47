pub mod error;
pub mod normalize;
pub mod store;

pub use error::PersistError;
pub use normalize::{normalize_conversation, normalize_history, Loaded};
pub use store::{keys, FileStore, KeyValueStore, MemoryStore};
