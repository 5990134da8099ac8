use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::project::ProjectId;

/// Events emitted by the chat controller.
/// UI subscribes to these for status text and repaint decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A send was accepted; user message and placeholder are stored
    SendStarted { project: ProjectId },

    /// The placeholder content grew; `len` is the full content length in bytes
    ContentUpdated { project: ProjectId, len: usize },

    /// Stream completed normally
    SendFinished { project: ProjectId },

    /// Stream stopped early on request
    SendCancelled { project: ProjectId },

    /// Send or stream failed
    SendFailed { project: ProjectId, error: ApiError },

    /// Conversation was cleared after a server reset
    ConversationReset { project: ProjectId },

    /// Project list or selection changed
    ProjectsChanged,
}

impl ChatEvent {
    pub fn project(&self) -> Option<&ProjectId> {
        match self {
            ChatEvent::SendStarted { project }
            | ChatEvent::ContentUpdated { project, .. }
            | ChatEvent::SendFinished { project }
            | ChatEvent::SendCancelled { project }
            | ChatEvent::SendFailed { project, .. }
            | ChatEvent::ConversationReset { project } => Some(project),
            ChatEvent::ProjectsChanged => None,
        }
    }
}
