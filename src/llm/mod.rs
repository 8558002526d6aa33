pub mod chat;
pub mod types;

pub use chat::{build_prompt, ChatError, ChatFallbackService, DEGRADED_CHAT_MESSAGE};
pub use types::{ChatMessage, ChatOptions, Role};
