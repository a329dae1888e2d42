//! Text rendering of the tool header, chat list, history and usage.

use quill_ai::{Message, Role};
use quill_common::{Action, Tool};

use super::core::QuillApp;

impl QuillApp {
    pub(super) fn render_header(&mut self) {
        let tool = self.tool;
        self.emit(format!("🛠 {tool}"));
        if self.show_descriptions {
            self.emit(format!("   {}", tool.description()));
        }
    }

    pub(super) fn render_tools(&mut self) {
        for (i, tool) in Tool::ALL.into_iter().enumerate() {
            let marker = if tool == self.tool { '*' } else { ' ' };
            self.emit(format!("{marker} {}. {tool}", i + 1));
        }
    }

    /// Chat list of the current tool, the active chat marked with `*` and
    /// open menus expanded under their entry.
    pub(super) fn render_chat_list(&mut self) {
        let tool = self.tool;
        let active = self.store.active_chat_id(tool).cloned();
        let mut lines = Vec::new();

        for (i, chat) in self.store.chats(tool).enumerate() {
            let position = i + 1;
            let marker = if active.as_ref() == Some(chat.id()) {
                '*'
            } else {
                ' '
            };
            lines.push(format!(
                "{marker} {position}. {} ({} messages)",
                chat.title(),
                chat.message_count()
            ));
            if self.views.get(tool, chat.id()).menu_open {
                lines.push(format!(
                    "      🕒 created {}",
                    chat.created_at().format("%Y-%m-%d %H:%M")
                ));
                lines.push(format!("      ✏️ rename: /rename {position} <title>"));
                lines.push(format!("      🗑️ delete: /delete {position}"));
            }
        }

        if lines.is_empty() {
            lines.push("No chats yet. Start a new chat with /new.".to_string());
        }
        self.output.extend(lines);
    }

    /// History of the active chat, or a hint when none is selected.
    pub(super) fn render_history(&mut self) {
        let lines: Vec<String> = match self.store.active_chat(self.tool) {
            Some(chat) => {
                let mut lines = vec![format!("── {} ──", chat.title())];
                lines.extend(chat.messages().iter().map(format_message));
                lines
            }
            None => vec!["Start a new chat with /new.".to_string()],
        };
        self.output.extend(lines);
    }

    pub(super) fn render_message(&mut self, message: &Message) {
        self.emit(format_message(message));
    }

    pub(super) fn render_usage(&mut self) {
        let Some(driver) = self.driver.as_ref() else {
            self.emit("No completion calls made (client not configured).");
            return;
        };
        let tracker = driver.tracker();
        let mut lines = vec![format!(
            "Model {}: {} calls, {} failed, {} tokens ({} in / {} out)",
            driver.model(),
            tracker.call_count(),
            tracker.failed_count(),
            tracker.total_tokens(),
            tracker.total().input_tokens,
            tracker.total().output_tokens,
        )];
        for tool in Tool::ALL {
            if let Some(usage) = tracker.for_tool(tool) {
                lines.push(format!("  {tool}: {} tokens", usage.total_tokens()));
            }
        }
        self.output.extend(lines);
    }

    pub(super) fn render_help(&mut self) {
        let lines: Vec<String> = Action::help_entries()
            .into_iter()
            .map(|(syntax, action)| format!("  {syntax:<22} {}", action.label()))
            .chain([
                "  Any other text is sent to the active chat.".to_string(),
                "  Start a line with // to send text that begins with /.".to_string(),
            ])
            .collect();
        self.output.extend(lines);
    }
}

fn format_message(message: &Message) -> String {
    let tag = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
        Role::System => "system",
    };
    format!("[{tag}] {}", message.content)
}
