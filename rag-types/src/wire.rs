//! Request and response schemas for the pipeline server.
//!
//! `/query`, `/clear` and `/initialize` answer with an envelope carrying a
//! `status` string. Those decode into [`Reply`]. `/history` and `/status`
//! have no envelope and decode directly.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure to turn a response body into a typed value.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Schema(#[source] serde_json::Error),
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitializeRequest {
    pub urls: Vec<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Any role other than `user` is shown as the assistant.
    #[serde(other)]
    Assistant,
}

/// One conversation turn as the server stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Output of one pipeline node for the latest query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineStep {
    pub step: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl PipelineStep {
    pub fn new(step: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            content: content.into(),
        }
    }
}

/// Success payload of `POST /query`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QueryAnswer {
    pub answer: String,
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

/// Success payload of `POST /clear` and `POST /initialize`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PipelineStatus {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub processing: bool,
    #[serde(default)]
    pub current_step: Option<String>,
}

/// Decoded envelope: either the typed success body or the server's failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Success(T),
    Failure { message: Option<String> },
}

impl<T> Reply<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// Server-supplied failure text, or `fallback` when there is none.
    pub fn failure_message(&self, fallback: &str) -> Option<String> {
        match self {
            Reply::Success(_) => None,
            Reply::Failure { message } => Some(
                message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ),
        }
    }
}

/// Decode an envelope response.
///
/// Only `status == "success"` counts as success; any other status, a missing
/// status, or a non-object body is a [`Reply::Failure`]. A success status
/// whose body does not fit `T` is a [`WireError::Schema`].
pub fn decode_reply<T>(body: &str) -> Result<Reply<T>, WireError>
where
    T: serde::de::DeserializeOwned,
{
    let value: Value = serde_json::from_str(body).map_err(WireError::Json)?;

    if value.get("status").and_then(Value::as_str) != Some("success") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Ok(Reply::Failure { message });
    }

    T::deserialize(value)
        .map(Reply::Success)
        .map_err(WireError::Schema)
}

pub fn decode_history(body: &str) -> Result<Vec<ChatMessage>, WireError> {
    let value: Value = serde_json::from_str(body).map_err(WireError::Json)?;
    let response = HistoryResponse::deserialize(value).map_err(WireError::Schema)?;
    Ok(response.history)
}

pub fn decode_status(body: &str) -> Result<PipelineStatus, WireError> {
    let value: Value = serde_json::from_str(body).map_err(WireError::Json)?;
    PipelineStatus::deserialize(value).map_err(WireError::Schema)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
