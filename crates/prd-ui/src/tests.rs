#[cfg(test)]
mod tests {
    use crate::panels::chat::display_text;
    use crate::state::*;
    use chrono::Utc;
    use prd_types::error::ApiError;
    use prd_types::event::ChatEvent;
    use prd_types::message::{Message, Role};
    use prd_types::project::ProjectId;

    fn pid(id: &str) -> ProjectId {
        ProjectId::from(id)
    }

    fn message(role: Role, content: &str) -> Message {
        Message {
            id: "msg-1".to_string(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new(2000);
        assert!(state.input_text.is_empty());
        assert!(state.new_project_name.is_empty());
        assert_eq!(state.status_text, "Ready");
        assert!(state.last_error.is_none());
        assert!(state.show_preview);
        assert!(!state.is_busy());
        assert_eq!(state.max_message_chars(), 2000);
    }

    #[test]
    fn test_send_lifecycle_status() {
        let mut state = UiState::new(2000);

        state.process_events(vec![ChatEvent::SendStarted { project: pid("a") }]);
        assert!(state.is_busy());
        assert!(state.is_busy_for(&pid("a")));
        assert!(!state.is_busy_for(&pid("b")));
        assert_eq!(state.status_text, "Generating...");

        state.process_events(vec![ChatEvent::ContentUpdated { project: pid("a"), len: 42 }]);
        assert_eq!(state.status_text, "Receiving... (42 bytes)");

        let refresh = state.process_events(vec![ChatEvent::SendFinished { project: pid("a") }]);
        assert_eq!(refresh, vec![pid("a")]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_cancel_does_not_request_refresh() {
        let mut state = UiState::new(2000);
        let refresh = state.process_events(vec![
            ChatEvent::SendStarted { project: pid("a") },
            ChatEvent::SendCancelled { project: pid("a") },
        ]);
        assert!(refresh.is_empty());
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Stopped");
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_failure_sets_error() {
        let mut state = UiState::new(2000);
        let error = ApiError {
            detail: "Server error occurred".to_string(),
            status: Some(500),
        };
        state.process_events(vec![
            ChatEvent::SendStarted { project: pid("a") },
            ChatEvent::SendFailed { project: pid("a"), error: error.clone() },
        ]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Error: Server error occurred");
        assert_eq!(state.last_error, Some(error));

        state.process_events(vec![ChatEvent::SendStarted { project: pid("a") }]);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_reset_clears_error() {
        let mut state = UiState::new(2000);
        state.report_error(ApiError { detail: "boom".to_string(), status: None });
        assert_eq!(state.status_text, "Error: boom");

        state.process_events(vec![ChatEvent::ConversationReset { project: pid("a") }]);
        assert!(state.last_error.is_none());
        assert_eq!(state.status_text, "Conversation reset");
    }

    #[test]
    fn test_refresh_deduplicated() {
        let mut state = UiState::new(2000);
        let refresh = state.process_events(vec![
            ChatEvent::SendFinished { project: pid("a") },
            ChatEvent::ProjectsChanged,
            ChatEvent::SendFinished { project: pid("a") },
            ChatEvent::SendFinished { project: pid("b") },
        ]);
        assert_eq!(refresh, vec![pid("a"), pid("b")]);
    }

    // ─── Input Tests ─────────────────────────────────────────

    #[test]
    fn test_input_truncated_at_limit() {
        let mut state = UiState::new(5);
        state.input_text = "héllo world".to_string();
        assert!(state.enforce_input_limit());
        assert_eq!(state.input_text, "héllo");
        assert!(!state.enforce_input_limit());
    }

    #[test]
    fn test_take_input_trims_and_clears() {
        let mut state = UiState::new(2000);
        state.input_text = "  Build a todo app  ".to_string();
        assert_eq!(state.take_input(), Some("Build a todo app".to_string()));
        assert!(state.input_text.is_empty());
    }

    #[test]
    fn test_take_input_blank_is_none() {
        let mut state = UiState::new(2000);
        state.input_text = "   ".to_string();
        assert_eq!(state.take_input(), None);
        assert_eq!(state.input_text, "   ");
    }

    #[test]
    fn test_take_project_name() {
        let mut state = UiState::new(2000);
        state.new_project_name = " Roadmap ".to_string();
        assert_eq!(state.take_project_name(), Some("Roadmap".to_string()));
        assert!(state.new_project_name.is_empty());
        assert_eq!(state.take_project_name(), None);
    }

    // ─── Chat Panel Helper Tests ─────────────────────────────

    #[test]
    fn test_streaming_assistant_shows_cursor() {
        let msg = message(Role::Assistant, "Hel");
        assert_eq!(display_text(&msg, true), "Hel▌");
        assert_eq!(display_text(&msg, false), "Hel");
    }

    #[test]
    fn test_user_message_never_shows_cursor() {
        let msg = message(Role::User, "hi");
        assert_eq!(display_text(&msg, true), "hi");
    }
}
