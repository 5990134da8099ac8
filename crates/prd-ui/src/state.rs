//! UI-level state that drives rendering.
//!
//! Conversations themselves are read from the controller each frame; this
//! only holds what the controller does not own: input buffers, the status
//! line, and which projects have a send in flight.

use std::collections::HashSet;

use prd_types::config::ClientConfig;
use prd_types::error::ApiError;
use prd_types::event::ChatEvent;
use prd_types::project::ProjectId;

/// State visible to UI panels
pub struct UiState {
    /// Chat input; never longer than `max_message_chars`
    pub input_text: String,
    /// Name field of the "new project" form
    pub new_project_name: String,
    /// Status line text
    pub status_text: String,
    /// Last failure reported through events
    pub last_error: Option<ApiError>,
    /// Whether the PRD preview pane is open
    pub show_preview: bool,
    max_message_chars: usize,
    in_flight: HashSet<ProjectId>,
}

impl UiState {
    pub fn new(max_message_chars: usize) -> Self {
        Self {
            input_text: String::new(),
            new_project_name: String::new(),
            status_text: "Ready".to_string(),
            last_error: None,
            show_preview: true,
            max_message_chars,
            in_flight: HashSet::new(),
        }
    }

    pub fn max_message_chars(&self) -> usize {
        self.max_message_chars
    }

    /// Apply a batch of controller events. Returns the projects whose
    /// document may have changed server-side and should be re-fetched.
    pub fn process_events(&mut self, events: Vec<ChatEvent>) -> Vec<ProjectId> {
        let mut refresh = Vec::new();
        for event in events {
            match event {
                ChatEvent::SendStarted { project } => {
                    self.in_flight.insert(project);
                    self.last_error = None;
                    self.status_text = "Generating...".to_string();
                }
                ChatEvent::ContentUpdated { len, .. } => {
                    self.status_text = format!("Receiving... ({} bytes)", len);
                }
                ChatEvent::SendFinished { project } => {
                    self.in_flight.remove(&project);
                    self.status_text = "Ready".to_string();
                    if !refresh.contains(&project) {
                        refresh.push(project);
                    }
                }
                ChatEvent::SendCancelled { project } => {
                    self.in_flight.remove(&project);
                    self.status_text = "Stopped".to_string();
                }
                ChatEvent::SendFailed { project, error } => {
                    self.in_flight.remove(&project);
                    self.status_text = format!("Error: {}", error.detail);
                    self.last_error = Some(error);
                }
                ChatEvent::ConversationReset { .. } => {
                    self.last_error = None;
                    self.status_text = "Conversation reset".to_string();
                }
                ChatEvent::ProjectsChanged => {}
            }
        }
        refresh
    }

    /// Clamp the input buffer to the configured limit (in chars).
    pub fn enforce_input_limit(&mut self) -> bool {
        match self.input_text.char_indices().nth(self.max_message_chars) {
            Some((cut, _)) => {
                self.input_text.truncate(cut);
                true
            }
            None => false,
        }
    }

    /// Take the trimmed input for sending. Blank input is left in place.
    pub fn take_input(&mut self) -> Option<String> {
        self.enforce_input_limit();
        let text = self.input_text.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.input_text.clear();
        Some(text)
    }

    pub fn take_project_name(&mut self) -> Option<String> {
        let name = self.new_project_name.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        self.new_project_name.clear();
        Some(name)
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_busy_for(&self, project: &ProjectId) -> bool {
        self.in_flight.contains(project)
    }

    /// Report a failure that did not come through the event bus.
    pub fn report_error(&mut self, error: ApiError) {
        self.status_text = format!("Error: {}", error.detail);
        self.last_error = Some(error);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(ClientConfig::default().max_message_chars)
    }
}
