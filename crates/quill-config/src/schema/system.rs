//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the Quill crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "quill=trace,quill_ai=trace,quill_config=trace",
            LogLevel::Debug => "quill=debug,quill_ai=debug,quill_config=debug",
            LogLevel::Info => "quill=info,quill_ai=info,quill_config=info",
            LogLevel::Warn => "quill=warn,quill_ai=warn,quill_config=warn",
            LogLevel::Error => "quill=error,quill_ai=error,quill_config=error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
