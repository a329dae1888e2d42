//! Per-chat presentation flags.
//!
//! Kept apart from the session store: these flags only describe what the
//! terminal is showing and are dropped with the chat they belong to.

use std::collections::HashMap;

use quill_ai::SessionStore;
use quill_common::{ChatId, Tool};

/// Transient UI state of one chat entry in the chat list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ChatViewState {
    /// The entry's action menu (rename/delete) is expanded.
    pub menu_open: bool,
    /// The next plain input line is taken as the chat's new title.
    pub editing_title: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ViewStates {
    states: HashMap<(Tool, ChatId), ChatViewState>,
}

impl ViewStates {
    pub fn get(&self, tool: Tool, id: &ChatId) -> ChatViewState {
        self.states
            .get(&(tool, id.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn entry(&mut self, tool: Tool, id: &ChatId) -> &mut ChatViewState {
        self.states.entry((tool, id.clone())).or_default()
    }

    /// Flip the menu flag; returns the new value.
    pub fn toggle_menu(&mut self, tool: Tool, id: &ChatId) -> bool {
        let state = self.entry(tool, id);
        state.menu_open = !state.menu_open;
        state.menu_open
    }

    pub fn close_menu(&mut self, tool: Tool, id: &ChatId) {
        self.entry(tool, id).menu_open = false;
    }

    /// Start editing a title. Only one chat per tool edits at a time.
    pub fn begin_edit(&mut self, tool: Tool, id: &ChatId) {
        for ((t, _), state) in &mut self.states {
            if *t == tool {
                state.editing_title = false;
            }
        }
        self.entry(tool, id).editing_title = true;
    }

    /// Chat of `tool` whose title is being edited, if any.
    pub fn editing(&self, tool: Tool) -> Option<ChatId> {
        self.states
            .iter()
            .find(|((t, _), state)| *t == tool && state.editing_title)
            .map(|((_, id), _)| id.clone())
    }

    /// Close both the menu and the title editor of a chat.
    pub fn finish(&mut self, tool: Tool, id: &ChatId) {
        self.states.remove(&(tool, id.clone()));
    }

    /// Drop flags of chats that no longer exist in the store.
    pub fn prune(&mut self, store: &SessionStore) {
        self.states
            .retain(|(tool, id), _| store.chat(*tool, id).is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_closed() {
        let mut store = SessionStore::new();
        let id = store.create_chat(Tool::Paraphrase);
        let views = ViewStates::default();
        assert_eq!(views.get(Tool::Paraphrase, &id), ChatViewState::default());
        assert!(views.editing(Tool::Paraphrase).is_none());
    }

    #[test]
    fn toggle_menu_flips() {
        let mut store = SessionStore::new();
        let id = store.create_chat(Tool::Paraphrase);
        let mut views = ViewStates::default();
        assert!(views.toggle_menu(Tool::Paraphrase, &id));
        assert!(!views.toggle_menu(Tool::Paraphrase, &id));
    }

    #[test]
    fn only_one_title_edit_per_tool() {
        let mut store = SessionStore::new();
        let a = store.create_chat(Tool::FixGrammar);
        let b = store.create_chat(Tool::FixGrammar);
        let other = store.create_chat(Tool::Paraphrase);
        let mut views = ViewStates::default();

        views.begin_edit(Tool::FixGrammar, &a);
        views.begin_edit(Tool::Paraphrase, &other);
        views.begin_edit(Tool::FixGrammar, &b);

        assert_eq!(views.editing(Tool::FixGrammar), Some(b.clone()));
        assert!(!views.get(Tool::FixGrammar, &a).editing_title);
        assert_eq!(views.editing(Tool::Paraphrase), Some(other));

        views.finish(Tool::FixGrammar, &b);
        assert!(views.editing(Tool::FixGrammar).is_none());
    }

    #[test]
    fn prune_drops_deleted_chats() {
        let mut store = SessionStore::new();
        let id = store.create_chat(Tool::AbstractWriting);
        let mut views = ViewStates::default();
        views.toggle_menu(Tool::AbstractWriting, &id);

        store.delete_chat(Tool::AbstractWriting, &id);
        views.prune(&store);
        assert_eq!(views.get(Tool::AbstractWriting, &id), ChatViewState::default());
    }
}
