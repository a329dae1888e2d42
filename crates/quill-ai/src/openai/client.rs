//! OpenAI client struct, request building, and response parsing.

use crate::{AiError, AiResponse, Message, TokenUsage};

use super::config::OpenAiConfig;

/// Longest slice of a raw error body carried into an error message.
const MAX_ERROR_BODY: usize = 200;

/// OpenAI Chat Completions client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the JSON request body for the Chat Completions API.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        let msgs: Vec<_> = messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "content": msg.content,
                })
            })
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "messages": msgs,
            "temperature": self.config.temperature,
        })
    }

    /// Parse a Chat Completions response. The reply is the first choice's
    /// message content.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let first = json["choices"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no choices in response".to_string()))?
            .first()
            .ok_or_else(|| AiError::ParseError("empty choices".to_string()))?;

        let content = first["message"]["content"]
            .as_str()
            .ok_or_else(|| AiError::ParseError("choice has no message content".to_string()))?
            .to_string();

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}

/// Pull a readable message out of an error response body.
///
/// OpenAI-style bodies carry `{"error": {"message": ...}}`; anything else is
/// truncated and returned raw.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn client() -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("sk-test")).unwrap()
    }

    #[test]
    fn api_url_joins_base_without_double_slash() {
        let c = OpenAiClient::new(OpenAiConfig::new("k").with_base_url("http://host/v1/")).unwrap();
        assert_eq!(c.api_url(), "http://host/v1/chat/completions");
        assert_eq!(client().api_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn request_body_keeps_order_and_fixed_parameters() {
        let body = client().build_request_body(&[
            Message::system("You fix grammar."),
            Message::user("He go to school"),
            Message::assistant("He goes to school."),
            Message::user("She go too"),
        ]);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["temperature"], 0.7);
        let msgs = body["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0]["role"], "system");
        assert_eq!(msgs[0]["content"], "You fix grammar.");
        assert_eq!(msgs[2]["role"], "assistant");
        assert_eq!(msgs[3]["role"], Role::User.as_str());
        assert_eq!(msgs[3]["content"], "She go too");
    }

    #[test]
    fn parse_response_reads_first_choice() {
        let json = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  He went to school yesterday.\n" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ],
            "usage": { "prompt_tokens": 31, "completion_tokens": 8 }
        });
        let resp = client().parse_response(json).unwrap();
        assert_eq!(resp.content, "  He went to school yesterday.\n");
        assert_eq!(resp.usage.input_tokens, 31);
        assert_eq!(resp.usage.output_tokens, 8);
    }

    #[test]
    fn parse_response_without_usage_defaults_to_zero() {
        let json = serde_json::json!({
            "choices": [{ "message": { "content": "ok" } }]
        });
        let resp = client().parse_response(json).unwrap();
        assert_eq!(resp.usage, TokenUsage::default());
    }

    #[test]
    fn parse_response_rejects_malformed_bodies() {
        let c = client();
        assert!(matches!(
            c.parse_response(serde_json::json!({})),
            Err(AiError::ParseError(_))
        ));
        assert!(matches!(
            c.parse_response(serde_json::json!({ "choices": [] })),
            Err(AiError::ParseError(_))
        ));
        assert!(matches!(
            c.parse_response(serde_json::json!({ "choices": [{ "message": {} }] })),
            Err(AiError::ParseError(_))
        ));
    }

    #[test]
    fn error_message_prefers_api_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn error_message_truncates_raw_bodies() {
        let body = "x".repeat(500);
        assert_eq!(error_message(&body).len(), MAX_ERROR_BODY);
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
