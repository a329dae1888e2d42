//! Chat session management.
//!
//! The `SessionStore` owns every chat of every tool for the process
//! lifetime; the `ConversationDriver` turns user input into an assistant
//! reply and records both in the store.

mod chat;
mod store;
mod types;


pub use chat::{build_request, error_reply, ConversationDriver, ERROR_MARKER};
pub use store::SessionStore;
pub use types::{ChatSession, SessionError};
