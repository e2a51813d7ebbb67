//! Streaming chat relay to the hosted model API.
//!
//! One in-flight request per conversation turn: the relay posts the
//! conversation with `stream: true` and forwards server-sent deltas over a
//! bounded channel in arrival order. There is no retry, no queueing, and no
//! buffering beyond line reassembly; dropping the receiver cancels the turn.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::advisor::prompt::build_system_prompt;
use crate::business::BusinessData;
use crate::config::AdvisorConfig;
use crate::error::{Error, Result};

/// Channel capacity for relayed events.
const RELAY_CHANNEL_CAPACITY: usize = 32;

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Signal relayed to the caller for one conversation turn.
///
/// Exactly one of `Done` or `Failed` terminates the turn; deltas arrive in
/// upstream order between `Started` and the terminal signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Upstream accepted the request; deltas may follow
    Started,
    /// One chunk of reply text, in arrival order
    Delta(String),
    /// Upstream finished the reply normally
    Done,
    /// Upstream or transport failed; terminal for this turn
    Failed(String),
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// A parsed server-sent line.
#[derive(Debug, PartialEq, Eq)]
enum StreamLine {
    Delta(String),
    Done,
}

/// Parse one SSE line from the completions stream.
///
/// Returns `None` for comments, heartbeats, and chunks without text content.
fn parse_stream_line(line: &str) -> Option<StreamLine> {
    let payload = line.trim().strip_prefix("data:")?.trim();
    if payload == "[DONE]" {
        return Some(StreamLine::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(payload).ok()?;
    let content = chunk.choices.into_iter().next()?.delta.content?;
    if content.is_empty() {
        None
    } else {
        Some(StreamLine::Delta(content))
    }
}

/// Client for the advisor chat relay.
pub struct AdvisorRelay {
    config: AdvisorConfig,
    http_client: reqwest::Client,
}

impl AdvisorRelay {
    /// Create a relay from configuration.
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = resolve_api_key(&config) {
            let auth_value = format!("Bearer {}", api_key);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Config(format!("invalid api_key: {}", e)))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Forward a conversation turn and stream the reply.
    ///
    /// Builds the system prompt from `data` and the latest user question,
    /// posts the conversation upstream, and returns a receiver of
    /// [`RelayEvent`]s. A pre-flight failure (request refused outright)
    /// returns `Err`; a mid-stream failure arrives as a single
    /// [`RelayEvent::Failed`].
    pub async fn stream_reply(
        &self,
        history: &[ChatMessage],
        data: &BusinessData,
    ) -> Result<mpsc::Receiver<RelayEvent>> {
        let question = history
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str());

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(build_system_prompt(data, question)));
        messages.extend(history.iter().cloned());

        let url = format!(
            "{}/v1/chat/completions",
            self.config.resolved_endpoint()
        );

        let request = CompletionRequest {
            model: &self.config.model,
            messages: &messages,
            stream: true,
        };

        tracing::debug!(
            model = %self.config.model,
            turns = history.len(),
            "Forwarding conversation to advisor upstream"
        );

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Relay(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Advisor upstream rejected request");
            return Err(Error::Relay(format!(
                "upstream returned {}: {}",
                status,
                body.trim()
            )));
        }

        let (tx, rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            if tx.send(RelayEvent::Started).await.is_err() {
                return;
            }

            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(next) = stream.next().await {
                let bytes = match next {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(error = %e, "Advisor stream broke mid-reply");
                        let _ = tx
                            .send(RelayEvent::Failed(format!("stream error: {}", e)))
                            .await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // SSE lines can split across chunks; only complete lines parse
                while let Some(pos) = buffer.find('\n') {
                    let line: String = buffer.drain(..=pos).collect();
                    match parse_stream_line(&line) {
                        Some(StreamLine::Done) => {
                            let _ = tx.send(RelayEvent::Done).await;
                            return;
                        }
                        Some(StreamLine::Delta(text)) => {
                            // Receiver dropped: the caller cancelled this turn
                            if tx.send(RelayEvent::Delta(text)).await.is_err() {
                                return;
                            }
                        }
                        None => {}
                    }
                }
            }

            // Upstream closed the connection without a [DONE] sentinel
            let _ = tx.send(RelayEvent::Done).await;
        });

        Ok(rx)
    }
}

fn resolve_api_key(config: &AdvisorConfig) -> Option<String> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var("PULSEBOARD_API_KEY").ok())
}

/// Drain a relay stream into the full reply text.
///
/// Convenience for callers that do not render deltas incrementally.
pub async fn collect_reply(mut rx: mpsc::Receiver<RelayEvent>) -> Result<String> {
    let mut reply = String::new();

    while let Some(event) = rx.recv().await {
        match event {
            RelayEvent::Started => {}
            RelayEvent::Delta(text) => reply.push_str(&text),
            RelayEvent::Done => return Ok(reply),
            RelayEvent::Failed(message) => return Err(Error::Relay(message)),
        }
    }

    // Sender dropped without a terminal signal
    Err(Error::Relay("stream ended unexpectedly".to_string()))
}
