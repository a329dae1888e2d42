//! Conversation driver: user text in, assistant reply out.

use std::sync::Arc;

use quill_common::{new_correlation_id, ChatId, Tool};
use tracing::{debug, warn};

use crate::token_tracker::TokenTracker;
use crate::{AiClient, AiError, Message, Role};

use super::store::SessionStore;
use super::types::SessionError;

/// Prefix of an assistant message that reports a failed completion call.
pub const ERROR_MARKER: &str = "❌ Error:";

/// Build the completion request for a chat: the tool's instruction, then the
/// whole history in append order.
pub fn build_request(tool: Tool, history: &[Message]) -> Vec<Message> {
    let mut msgs = Vec::with_capacity(history.len() + 1);
    msgs.push(Message::system(tool.instruction()));
    msgs.extend(history.iter().cloned());
    msgs
}

/// Assistant message content standing in for a failed call.
pub fn error_reply(err: &AiError) -> String {
    format!("{ERROR_MARKER} {err}")
}

/// Sends chat history to the completion client and records the exchange.
pub struct ConversationDriver {
    client: Arc<dyn AiClient>,
    tracker: TokenTracker,
}

impl ConversationDriver {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self {
            client,
            tracker: TokenTracker::new(),
        }
    }

    /// Append `user_text` to the chat, ask the client for a reply and append
    /// that as an assistant message.
    ///
    /// Client failures never surface as `Err`: they become an assistant
    /// message starting with [`ERROR_MARKER`], so every call on an existing
    /// chat grows it by exactly two messages. `Err` is only returned when the
    /// chat does not exist, before anything is sent.
    pub async fn send_user_message(
        &mut self,
        store: &mut SessionStore,
        tool: Tool,
        id: &ChatId,
        user_text: impl Into<String>,
    ) -> Result<Message, SessionError> {
        store.append_message(tool, id, Role::User, user_text)?;

        let history = store.messages(tool, id).unwrap_or_default();
        let request = build_request(tool, history);

        let cid = new_correlation_id();
        debug!(
            %cid,
            %tool,
            chat = %id,
            model = self.client.model(),
            messages = request.len(),
            "Sending completion request"
        );

        let reply = match self.client.send_message(&request).await {
            Ok(response) => {
                self.tracker.record(tool, &response.usage);
                debug!(
                    %cid,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Completion received"
                );
                response.content.trim().to_string()
            }
            Err(e) => {
                self.tracker.record_failure();
                warn!(%cid, %tool, chat = %id, error = %e, "Completion failed");
                error_reply(&e)
            }
        };

        store
            .append_message(tool, id, Role::Assistant, reply)
            .cloned()
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// Zero the usage counters; chat histories are untouched.
    pub fn reset_usage(&mut self) {
        self.tracker.reset();
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}
