use serde::{Deserialize, Serialize};

use crate::types::Tool;

/// Every user-triggerable action in the application.
///
/// Input lines resolve to an `Action`; the app dispatcher matches on this
/// enum to route to the session store or the conversation driver. Chat
/// positions are 1-based indices into the current tool's chat list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Tools --
    ListTools,
    SelectTool(Tool),

    // -- Chats --
    NewChat,
    ListChats,
    SelectChat(usize),
    ToggleMenu(usize),
    RenameChat {
        position: usize,
        title: Option<String>,
    },
    DeleteChat(usize),

    // -- Conversation --
    SendMessage(String),
    ShowHistory,
    ShowUsage,
    ResetUsage,

    // -- App --
    Help,
    Quit,

    // -- Noop --
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("unknown command: /{0} (try /help, or start with // to send it as text)")]
    UnknownCommand(String),

    #[error("/{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("invalid argument for /{command}: {value}")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

impl Action {
    /// Parse one line of user input.
    ///
    /// Lines starting with `/` are commands; anything else is a message for
    /// the active chat, sent verbatim. A leading `//` escapes the command
    /// prefix: `//usr/bin` sends `/usr/bin`. Only an empty line resolves to
    /// [`Action::None`].
    pub fn parse(line: &str) -> Result<Action, ParseActionError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(Action::None);
        }
        let trimmed = line.trim();
        if let Some(escaped) = line.trim_start().strip_prefix("//") {
            return Ok(Action::SendMessage(format!("/{escaped}")));
        }
        let Some(command_line) = trimmed.strip_prefix('/') else {
            return Ok(Action::SendMessage(line.to_string()));
        };

        let (command, rest) = match command_line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (command_line, ""),
        };

        match command {
            "tools" => Ok(Action::ListTools),
            "tool" => {
                if rest.is_empty() {
                    return Err(ParseActionError::MissingArgument {
                        command: "tool",
                        what: "a tool name or number",
                    });
                }
                Tool::from_input(rest)
                    .map(Action::SelectTool)
                    .ok_or_else(|| ParseActionError::InvalidArgument {
                        command: "tool",
                        value: rest.to_string(),
                    })
            }
            "new" => Ok(Action::NewChat),
            "chats" => Ok(Action::ListChats),
            "select" => parse_position("select", rest).map(Action::SelectChat),
            "menu" => parse_position("menu", rest).map(Action::ToggleMenu),
            "delete" => parse_position("delete", rest).map(Action::DeleteChat),
            "rename" => {
                let (position, title) = match rest.split_once(char::is_whitespace) {
                    Some((position, title)) => (position, Some(title.to_string())),
                    None => (rest, None),
                };
                let position = parse_position("rename", position)?;
                Ok(Action::RenameChat { position, title })
            }
            "history" => Ok(Action::ShowHistory),
            "usage" => match rest {
                "" => Ok(Action::ShowUsage),
                "reset" => Ok(Action::ResetUsage),
                other => Err(ParseActionError::InvalidArgument {
                    command: "usage",
                    value: other.to_string(),
                }),
            },
            "help" => Ok(Action::Help),
            "quit" | "exit" => Ok(Action::Quit),
            other => Err(ParseActionError::UnknownCommand(other.to_string())),
        }
    }

    /// Human-readable label for display in help output.
    pub fn label(&self) -> &'static str {
        match self {
            Action::ListTools => "List Tools",
            Action::SelectTool(_) => "Select Tool",
            Action::NewChat => "New Chat",
            Action::ListChats => "List Chats",
            Action::SelectChat(_) => "Select Chat",
            Action::ToggleMenu(_) => "Chat Menu",
            Action::RenameChat { .. } => "Rename Chat",
            Action::DeleteChat(_) => "Delete Chat",
            Action::SendMessage(_) => "Send Message",
            Action::ShowHistory => "Show History",
            Action::ShowUsage => "Token Usage",
            Action::ResetUsage => "Reset Token Usage",
            Action::Help => "Help",
            Action::Quit => "Quit",
            Action::None => "None",
        }
    }

    /// Command syntax for each action listed by `/help`.
    pub fn help_entries() -> Vec<(&'static str, Action)> {
        vec![
            ("/tools", Action::ListTools),
            ("/tool <name|n>", Action::SelectTool(Tool::default())),
            ("/new", Action::NewChat),
            ("/chats", Action::ListChats),
            ("/select <n>", Action::SelectChat(1)),
            ("/menu <n>", Action::ToggleMenu(1)),
            (
                "/rename <n> [title]",
                Action::RenameChat {
                    position: 1,
                    title: None,
                },
            ),
            ("/delete <n>", Action::DeleteChat(1)),
            ("/history", Action::ShowHistory),
            ("/usage", Action::ShowUsage),
            ("/usage reset", Action::ResetUsage),
            ("/help", Action::Help),
            ("/quit", Action::Quit),
        ]
    }
}

fn parse_position(command: &'static str, value: &str) -> Result<usize, ParseActionError> {
    if value.is_empty() {
        return Err(ParseActionError::MissingArgument {
            command,
            what: "a chat number",
        });
    }
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseActionError::InvalidArgument {
            command,
            value: value.to_string(),
        }),
    }
}
