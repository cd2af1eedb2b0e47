pub mod conversation;
pub mod message;
pub mod model;
pub mod session;

pub use conversation::Conversation;
pub use message::{Message, Role};
pub use model::ChatModel;
pub use session::{SessionState, Theme};
