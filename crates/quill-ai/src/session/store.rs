//! In-memory chat registry, namespaced by tool.

use std::collections::{BTreeMap, HashMap};

use chrono::Local;
use quill_common::{ChatId, Tool};
use tracing::{debug, info};

use crate::{Message, Role};

use super::types::{ChatSession, SessionError};

/// Chats of a single tool.
#[derive(Debug, Default)]
struct ToolChats {
    /// Keyed by id; `ChatId` orders by creation sequence.
    chats: BTreeMap<ChatId, ChatSession>,
    /// Currently selected chat. Always a key of `chats` when set.
    active: Option<ChatId>,
    /// Last sequence number handed out. Never reused, even after deletion.
    last_seq: u64,
}

/// Registry of every chat for every tool.
///
/// Tools are fully isolated: ids, titles, histories and the active
/// selection of one tool are invisible to the others.
#[derive(Debug)]
pub struct SessionStore {
    tools: HashMap<Tool, ToolChats>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            tools: Tool::ALL
                .into_iter()
                .map(|tool| (tool, ToolChats::default()))
                .collect(),
        }
    }

    fn registry(&self, tool: Tool) -> Option<&ToolChats> {
        self.tools.get(&tool)
    }

    fn registry_mut(&mut self, tool: Tool) -> &mut ToolChats {
        self.tools.entry(tool).or_default()
    }

    /// Create an empty chat titled `Chat N` and make it the active one.
    pub fn create_chat(&mut self, tool: Tool) -> ChatId {
        let registry = self.registry_mut(tool);
        registry.last_seq += 1;
        let now = Local::now();
        let id = ChatId::new(registry.last_seq, now);
        let title = format!("Chat {}", registry.chats.len() + 1);

        registry
            .chats
            .insert(id.clone(), ChatSession::new(id.clone(), title, now));
        registry.active = Some(id.clone());

        info!(%tool, chat = %id, "Chat created");
        id
    }

    /// Replace a chat's title with the trimmed `new_title`.
    ///
    /// Blank titles and unknown chats leave everything unchanged. Returns
    /// whether the title was replaced.
    pub fn rename_chat(&mut self, tool: Tool, id: &ChatId, new_title: &str) -> bool {
        let title = new_title.trim();
        if title.is_empty() {
            debug!(%tool, chat = %id, "Ignoring blank chat title");
            return false;
        }
        match self.registry_mut(tool).chats.get_mut(id) {
            Some(chat) => {
                chat.title = title.to_string();
                debug!(%tool, chat = %id, title, "Chat renamed");
                true
            }
            None => false,
        }
    }

    /// Remove a chat. Clears the active selection if it pointed at it.
    ///
    /// Deleting an unknown chat is a no-op. Returns whether a chat was removed.
    pub fn delete_chat(&mut self, tool: Tool, id: &ChatId) -> bool {
        let registry = self.registry_mut(tool);
        if registry.chats.remove(id).is_none() {
            return false;
        }
        if registry.active.as_ref() == Some(id) {
            registry.active = None;
        }
        info!(%tool, chat = %id, "Chat deleted");
        true
    }

    /// Make `id` the active chat of `tool`.
    pub fn select_chat(&mut self, tool: Tool, id: &ChatId) -> Result<(), SessionError> {
        let registry = self.registry_mut(tool);
        if !registry.chats.contains_key(id) {
            return Err(SessionError::ChatNotFound {
                tool,
                id: id.clone(),
            });
        }
        registry.active = Some(id.clone());
        debug!(%tool, chat = %id, "Chat selected");
        Ok(())
    }

    /// Append a user or assistant message to a chat.
    pub fn append_message(
        &mut self,
        tool: Tool,
        id: &ChatId,
        role: Role,
        content: impl Into<String>,
    ) -> Result<&Message, SessionError> {
        if role == Role::System {
            return Err(SessionError::InvalidRole(role));
        }
        let chat = self
            .registry_mut(tool)
            .chats
            .get_mut(id)
            .ok_or_else(|| SessionError::ChatNotFound {
                tool,
                id: id.clone(),
            })?;

        chat.messages.push(Message {
            role,
            content: content.into(),
        });
        debug!(%tool, chat = %id, %role, count = chat.messages.len(), "Message appended");
        Ok(&chat.messages[chat.messages.len() - 1])
    }

    /// Chats of a tool in creation order.
    pub fn chats(&self, tool: Tool) -> impl Iterator<Item = &ChatSession> + '_ {
        self.registry(tool)
            .into_iter()
            .flat_map(|registry| registry.chats.values())
    }

    pub fn chat(&self, tool: Tool, id: &ChatId) -> Option<&ChatSession> {
        self.registry(tool)?.chats.get(id)
    }

    pub fn messages(&self, tool: Tool, id: &ChatId) -> Option<&[Message]> {
        self.chat(tool, id).map(ChatSession::messages)
    }

    pub fn chat_count(&self, tool: Tool) -> usize {
        self.registry(tool).map_or(0, |registry| registry.chats.len())
    }

    pub fn active_chat_id(&self, tool: Tool) -> Option<&ChatId> {
        self.registry(tool)?.active.as_ref()
    }

    pub fn active_chat(&self, tool: Tool) -> Option<&ChatSession> {
        let id = self.active_chat_id(tool)?;
        self.chat(tool, id)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
