//! Configuration schema types for Quill.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults below.

mod api;
mod system;
mod ui;

pub use api::*;
pub use system::*;
pub use ui::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Quill.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct QuillConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}
