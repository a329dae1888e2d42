//! Input dispatch: one line in, one handled event.

use quill_common::{Action, ChatId, Notification};

use super::core::{Flow, QuillApp};

impl QuillApp {
    /// Handle one line of user input to completion, including any
    /// completion call it triggers.
    ///
    /// While a title edit is pending, text lines become the title instead of
    /// a message.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let action = match Action::parse(line) {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable input");
                self.notify(Notification::warning(e.to_string()));
                return Flow::Continue;
            }
        };

        if let Some(id) = self.views.editing(self.tool) {
            match &action {
                Action::SendMessage(title) => {
                    self.save_title(&id, title);
                    return Flow::Continue;
                }
                Action::None => {
                    self.save_title(&id, "");
                    return Flow::Continue;
                }
                _ => {}
            }
        }

        self.dispatch(action).await
    }

    pub async fn dispatch(&mut self, action: Action) -> Flow {
        tracing::debug!(action = action.label(), tool = %self.tool, "Dispatching action");

        match action {
            Action::ListTools => self.render_tools(),
            Action::SelectTool(tool) => {
                self.tool = tool;
                self.render_header();
                self.render_chat_list();
                if self.store.active_chat(tool).is_some() {
                    self.render_history();
                }
            }
            Action::NewChat => {
                let id = self.store.create_chat(self.tool);
                let title = self.chat_title(&id);
                self.notify(Notification::info(format!("Started {title}")));
                self.render_chat_list();
            }
            Action::ListChats => self.render_chat_list(),
            Action::SelectChat(position) => {
                if let Some(id) = self.resolve_position(position) {
                    if self.store.select_chat(self.tool, &id).is_ok() {
                        self.views.close_menu(self.tool, &id);
                        self.render_history();
                    }
                }
            }
            Action::ToggleMenu(position) => {
                if let Some(id) = self.resolve_position(position) {
                    self.views.toggle_menu(self.tool, &id);
                    self.render_chat_list();
                }
            }
            Action::RenameChat { position, title } => {
                if let Some(id) = self.resolve_position(position) {
                    match title {
                        Some(title) => self.save_title(&id, &title),
                        None => {
                            self.views.begin_edit(self.tool, &id);
                            let current = self.chat_title(&id);
                            self.emit(format!(
                                "Enter a new title for '{current}' (blank keeps it):"
                            ));
                        }
                    }
                }
            }
            Action::DeleteChat(position) => {
                if let Some(id) = self.resolve_position(position) {
                    let title = self.chat_title(&id);
                    if self.store.delete_chat(self.tool, &id) {
                        self.views.prune(&self.store);
                        self.notify(Notification::info(format!("Deleted {title}")));
                    }
                    self.render_chat_list();
                }
            }
            Action::SendMessage(text) => self.send(text).await,
            Action::ShowHistory => self.render_history(),
            Action::ShowUsage => self.render_usage(),
            Action::ResetUsage => match self.driver.as_mut() {
                Some(driver) => {
                    driver.reset_usage();
                    tracing::info!("Token usage reset");
                    self.notify(Notification::info("Token usage reset"));
                }
                None => self.notify(Notification::warning("No completion client to reset")),
            },
            Action::Help => self.render_help(),
            Action::Quit => return Flow::Quit,
            Action::None => {}
        }
        Flow::Continue
    }

    /// Run one conversation turn on the active chat.
    async fn send(&mut self, text: String) {
        let tool = self.tool;
        let Some(id) = self.store.active_chat_id(tool).cloned() else {
            self.notify(Notification::info("Start a new chat with /new."));
            return;
        };
        let Some(driver) = self.driver.as_mut() else {
            let reason = self
                .startup_error
                .clone()
                .unwrap_or_else(|| "completion client not configured".to_string());
            self.notify(Notification::error(format!(
                "Completion calls are disabled: {reason}"
            )));
            return;
        };

        let result = driver
            .send_user_message(&mut self.store, tool, &id, text)
            .await;
        match result {
            Ok(reply) => self.render_message(&reply),
            Err(e) => {
                tracing::warn!(error = %e, "Message not sent");
                self.notify(Notification::error(e.to_string()));
            }
        }
    }

    /// Apply a title edit and close the chat's menu and editor.
    fn save_title(&mut self, id: &ChatId, title: &str) {
        let tool = self.tool;
        if self.store.rename_chat(tool, id, title) {
            let title = self.chat_title(id);
            self.notify(Notification::info(format!("Renamed to {title}")));
        } else {
            self.notify(Notification::info("Title unchanged"));
        }
        self.views.finish(tool, id);
        self.render_chat_list();
    }

    fn chat_title(&self, id: &ChatId) -> String {
        self.store
            .chat(self.tool, id)
            .map(|chat| chat.title().to_string())
            .unwrap_or_default()
    }
}
