//! Completion API configuration.

use serde::{Deserialize, Serialize};

/// Model used for every completion request unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature used for every completion request unless overridden.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Base URL of an OpenAI-compatible Chat Completions API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API credential.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Completion endpoint settings. The credential itself is never stored in
/// the config file; only the name of the variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub model: String,
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    pub base_url: String,
    pub api_key_env: String,
    /// Seconds, valid range: 1-600.
    pub connect_timeout_secs: u32,
    /// Seconds, valid range: 1-3600.
    pub request_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.into(),
            api_key_env: DEFAULT_API_KEY_ENV.into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}
