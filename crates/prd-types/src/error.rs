use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NETWORK_UNREACHABLE: &str = "Network error - unable to reach server";
pub const SERVER_ERROR_FALLBACK: &str = "Server error occurred";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// No response reached the client
    #[error("Network error: {0}")]
    Network(String),

    /// A non-2xx response was received
    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// The caller aborted the operation. Not a failure.
    #[error("Cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Other(String),
}

impl ChatError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatError::Cancelled)
    }

    /// HTTP status, with 0 meaning no response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Network(_) | ChatError::Timeout(_) => Some(0),
            ChatError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable detail suitable for presentation.
    pub fn detail(&self) -> String {
        match self {
            ChatError::Network(_) | ChatError::Timeout(_) => NETWORK_UNREACHABLE.to_string(),
            ChatError::Server { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}

/// Uniform error record handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
}

impl From<&ChatError> for ApiError {
    fn from(e: &ChatError) -> Self {
        Self {
            detail: e.detail(),
            status: e.status(),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError::from(&e)
    }
}

/// Error body returned by the server on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Build a `Server` error from a status and a raw (possibly empty or non-JSON) body.
    pub fn into_server_error(status: u16, raw: &str) -> ChatError {
        let detail = serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
        ChatError::Server { status, detail }
    }
}
