pub mod ingest;
pub mod store;

pub use ingest::ReplyAccumulator;
pub use store::SessionStore;
