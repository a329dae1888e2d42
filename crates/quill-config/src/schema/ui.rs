//! Terminal front-end settings.

use quill_common::Tool;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tool selected at startup.
    pub default_tool: Tool,
    /// Print the tool description under the tool header.
    pub show_descriptions: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::Paraphrase,
            show_descriptions: true,
        }
    }
}
