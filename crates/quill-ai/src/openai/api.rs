//! AiClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, AiResponse, Message};

use super::client::{error_message, OpenAiClient};

/// `reqwest` puts the actual cause (timeout, refused connection, TLS) in
/// the source chain, not in its own Display.
fn describe(e: &reqwest::Error) -> String {
    let mut text = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Map a transport failure, keeping timeouts distinguishable.
fn transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout(describe(&e))
    } else {
        AiError::NetworkError(describe(&e))
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages);

        debug!(model = %self.config.model, messages = messages.len(), "OpenAI API request");

        let response = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message(&text);
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(AiError::Unauthorized(message));
            }
            return Err(AiError::ApiError(format!("HTTP {status}: {message}")));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout(describe(&e))
            } else {
                AiError::ParseError(describe(&e))
            }
        })?;

        self.parse_response(json)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;
    use crate::openai::OpenAiConfig;

    /// What the local endpoint does once a request has been read.
    enum Reply {
        Respond(&'static str, &'static str),
        Stall,
    }

    /// Read one HTTP/1.1 request (headers plus `content-length` body).
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Accept a single connection on a local port. The handle yields the raw
    /// request text.
    async fn endpoint(reply: Reply) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            match reply {
                Reply::Respond(status, body) => {
                    let response = format!(
                        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                    let _ = socket.shutdown().await;
                }
                Reply::Stall => tokio::time::sleep(Duration::from_secs(10)).await,
            }
            request
        });

        (base_url, handle)
    }

    fn client_for(base_url: &str) -> OpenAiClient {
        let config = OpenAiConfig::new("sk-local")
            .with_base_url(base_url)
            .with_timeouts(Duration::from_secs(2), Duration::from_millis(300));
        OpenAiClient::new(config).unwrap()
    }

    async fn send(reply: Reply) -> Result<AiResponse, AiError> {
        let (base_url, _server) = endpoint(reply).await;
        client_for(&base_url)
            .send_message(&[Message::user("hello")])
            .await
    }

    #[tokio::test]
    async fn success_returns_raw_content_and_usage() {
        let (base_url, server) = endpoint(Reply::Respond(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":" hi "}}],"usage":{"prompt_tokens":9,"completion_tokens":2}}"#,
        ))
        .await;

        let resp = client_for(&base_url)
            .send_message(&[Message::system("Be brief."), Message::user("hello")])
            .await
            .unwrap();
        assert_eq!(resp.content, " hi ");
        assert_eq!(resp.usage.input_tokens, 9);
        assert_eq!(resp.usage.output_tokens, 2);

        let request = server.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(request.starts_with("POST /v1/chat/completions HTTP/1.1"));
        assert!(lowered.contains("authorization: bearer sk-local"));
        assert!(request.contains(r#""model":"gpt-3.5-turbo""#));
        assert!(request.contains(r#""temperature":0.7"#));
    }

    #[tokio::test]
    async fn unauthorized_statuses_carry_api_message() {
        for status in ["401 Unauthorized", "403 Forbidden"] {
            let err = send(Reply::Respond(
                status,
                r#"{"error":{"message":"bad key provided"}}"#,
            ))
            .await
            .unwrap_err();
            assert!(
                matches!(err, AiError::Unauthorized(ref m) if m == "bad key provided"),
                "{status}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = send(Reply::Respond("429 Too Many Requests", "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::RateLimited));
        assert_eq!(err.to_string(), "Rate limited");
    }

    #[tokio::test]
    async fn other_statuses_become_api_errors() {
        let err = send(Reply::Respond("500 Internal Server Error", "upstream exploded"))
            .await
            .unwrap_err();
        let AiError::ApiError(message) = &err else {
            panic!("expected ApiError, got {err:?}");
        };
        assert!(message.starts_with("HTTP 500"));
        assert!(message.ends_with("upstream exploded"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_parse_error() {
        let err = send(Reply::Respond("200 OK", r#"{"choices":[]}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }

    #[tokio::test]
    async fn stalled_endpoint_times_out_with_cause() {
        let err = send(Reply::Stall).await.unwrap_err();
        let AiError::Timeout(detail) = &err else {
            panic!("expected Timeout, got {err:?}");
        };
        assert!(detail.contains("timed out"), "{detail}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
        drop(listener);

        let err = client_for(&base_url)
            .send_message(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::NetworkError(_)), "{err:?}");
    }
}
