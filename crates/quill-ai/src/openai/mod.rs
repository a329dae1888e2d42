//! OpenAI Chat Completions client.
//!
//! Implements the `AiClient` trait against any OpenAI-compatible
//! `/chat/completions` endpoint using bearer-token authentication.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
