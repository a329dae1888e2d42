//! QuillApp struct and construction.

use quill_ai::{ConversationDriver, SessionStore};
use quill_common::{ChatId, Notification, NotificationQueue, Tool};
use quill_config::QuillConfig;

use super::view_state::ViewStates;

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Application state for one terminal session.
pub(crate) struct QuillApp {
    /// Every chat of every tool.
    pub(super) store: SessionStore,
    /// `None` when no completion client could be built at startup.
    pub(super) driver: Option<ConversationDriver>,
    /// Why `driver` is missing, shown when the user tries to send.
    pub(super) startup_error: Option<String>,
    /// Tool shown in the main area.
    pub(super) tool: Tool,
    pub(super) views: ViewStates,
    pub(super) notifications: NotificationQueue,
    /// Lines produced since the last `take_output`.
    pub(super) output: Vec<String>,
    pub(super) show_descriptions: bool,
}

impl QuillApp {
    pub fn new(
        config: &QuillConfig,
        tool: Option<Tool>,
        driver: Option<ConversationDriver>,
        startup_error: Option<String>,
    ) -> Self {
        let mut notifications = NotificationQueue::default();
        if let Some(ref e) = startup_error {
            notifications.push(Notification::error(format!(
                "Completion calls are disabled: {e}"
            )));
        }

        Self {
            store: SessionStore::new(),
            driver,
            startup_error,
            tool: tool.unwrap_or(config.ui.default_tool),
            views: ViewStates::default(),
            notifications,
            output: Vec::new(),
            show_descriptions: config.ui.show_descriptions,
        }
    }

    /// Lines to print, oldest first. Pending notifications come last.
    pub fn take_output(&mut self) -> Vec<String> {
        let mut lines = std::mem::take(&mut self.output);
        lines.extend(
            self.notifications
                .drain()
                .into_iter()
                .map(|n| n.to_string()),
        );
        lines
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub(super) fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub(super) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Id of the chat at 1-based `position` in the current tool's list.
    pub(super) fn chat_id_at(&self, position: usize) -> Option<ChatId> {
        self.store
            .chats(self.tool)
            .nth(position.checked_sub(1)?)
            .map(|chat| chat.id().clone())
    }

    /// Resolve a position, queueing a warning when it is out of range.
    pub(super) fn resolve_position(&mut self, position: usize) -> Option<ChatId> {
        let id = self.chat_id_at(position);
        if id.is_none() {
            let tool = self.tool;
            self.notify(Notification::warning(format!(
                "No chat #{position} under {tool} (see /chats)"
            )));
        }
        id
    }

    /// Prompt shown before each input line.
    pub fn prompt(&self) -> String {
        if let Some(id) = self.views.editing(self.tool) {
            let title = self
                .store
                .chat(self.tool, &id)
                .map(|chat| chat.title().to_string())
                .unwrap_or_default();
            return format!("new title for '{title}'> ");
        }
        match self.store.active_chat(self.tool) {
            Some(chat) => format!("{} / {}> ", self.tool, chat.title()),
            None => format!("{}> ", self.tool),
        }
    }
}
