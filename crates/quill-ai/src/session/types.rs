//! Chat session types and errors.

use chrono::{DateTime, Local};
use quill_common::{ChatId, Tool};

use crate::{Message, Role};

/// One chat of a tool: a title and an append-only message history.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub(super) id: ChatId,
    pub(super) title: String,
    pub(super) messages: Vec<Message>,
    pub(super) created_at: DateTime<Local>,
}

impl ChatSession {
    pub(super) fn new(id: ChatId, title: String, created_at: DateTime<Local>) -> Self {
        Self {
            id,
            title,
            messages: Vec::new(),
            created_at,
        }
    }

    pub fn id(&self) -> &ChatId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full conversation history in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no chat {id} under {tool}")]
    ChatNotFound { tool: Tool, id: ChatId },

    #[error("chats only hold user and assistant messages, got {0}")]
    InvalidRole(Role),
}
