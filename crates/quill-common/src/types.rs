use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A writing tool. Each tool keeps its own set of chats and sends a fixed
/// instruction ahead of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum Tool {
    #[default]
    #[serde(rename = "Paraphrase")]
    Paraphrase,
    #[serde(rename = "Fix Grammar")]
    FixGrammar,
    #[serde(rename = "Abstract Writing")]
    AbstractWriting,
}

impl Tool {
    /// Every tool, in selector order.
    pub const ALL: [Tool; 3] = [Tool::Paraphrase, Tool::FixGrammar, Tool::AbstractWriting];

    /// Display name shown in the tool selector.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Paraphrase => "Paraphrase",
            Tool::FixGrammar => "Fix Grammar",
            Tool::AbstractWriting => "Abstract Writing",
        }
    }

    /// One-line description shown under the tool header.
    pub fn description(self) -> &'static str {
        match self {
            Tool::Paraphrase => "Rephrases your text while preserving the original meaning.",
            Tool::FixGrammar => "Corrects grammatical mistakes in your text.",
            Tool::AbstractWriting => "Generates a concise abstract for your longer text.",
        }
    }

    /// System instruction sent as the first entry of every request.
    pub fn instruction(self) -> &'static str {
        match self {
            Tool::Paraphrase => {
                "You are a helpful assistant that paraphrases text while preserving its meaning."
            }
            Tool::FixGrammar => {
                "You are a helpful assistant that fixes grammatical errors in a given text."
            }
            Tool::AbstractWriting => {
                "You are a helpful assistant that writes a concise academic-style abstract \
                 from a longer passage."
            }
        }
    }

    /// Resolve a tool from user input: a display name (case, spaces,
    /// hyphens and underscores ignored) or a 1-based selector position.
    pub fn from_input(input: &str) -> Option<Tool> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Tool::ALL.get(i).copied());
        }
        let wanted = normalize(input);
        Tool::ALL
            .into_iter()
            .find(|tool| normalize(tool.name()) == wanted)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::from_input(s).ok_or_else(|| format!("unknown tool: {s}"))
    }
}
