use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// A stored chat message.
///
/// Only `content` ever changes after creation, and only on the last
/// assistant message of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Copy of this message with a different body; id, role and timestamp are kept.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            role: self.role,
            content: content.into(),
            timestamp: self.timestamp,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// A message that has not been stored yet (no id assigned).
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl NewMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Empty assistant message that streaming fills in.
    pub fn placeholder() -> Self {
        Self::assistant(String::new())
    }

    pub fn into_message(self, id: String) -> Message {
        Message {
            id,
            role: self.role,
            content: self.content,
            timestamp: self.timestamp,
        }
    }
}

/// Fresh client-side message id.
pub fn generate_message_id() -> String {
    format!("msg-{}", uuid::Uuid::new_v4())
}

/// Body of `POST /api/chat/stream`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub project_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, project_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            project_id,
        }
    }
}
