#[cfg(test)]
mod tests {
    use crate::http::*;
    use prd_types::config::ClientConfig;
    use prd_types::project::ProjectId;
    use prd_types::ChatError;

    fn transport(url: Option<&str>, port: Option<&str>) -> HttpTransport {
        let mut config = ClientConfig::default();
        config.apply_overrides(url, port, None);
        HttpTransport::new(config)
    }

    // ─── Endpoint Tests ──────────────────────────────────────

    #[test]
    fn test_default_endpoints_are_api_rooted() {
        let t = transport(None, None);
        assert_eq!(t.url("/chat/stream"), "http://localhost:8000/api/chat/stream");
        assert_eq!(t.url("/health"), "http://localhost:8000/api/health");
    }

    #[test]
    fn test_port_override_changes_local_url() {
        let t = transport(None, Some("9100"));
        assert_eq!(t.url("/projects"), "http://localhost:9100/api/projects");
    }

    #[test]
    fn test_base_url_override_wins() {
        let t = transport(Some("https://prd.example.com/"), Some("9100"));
        assert_eq!(t.url("/chat/reset"), "https://prd.example.com/api/chat/reset");
    }

    #[test]
    fn test_project_path() {
        assert_eq!(project_path(&ProjectId::from("p-42")), "/projects/p-42");
    }

    #[test]
    fn test_verbs() {
        assert_eq!(Verb::Get.as_str(), "GET");
        assert_eq!(Verb::Put.as_str(), "PUT");
        assert_eq!(Verb::Delete.as_str(), "DELETE");
    }

    // ─── Error Mapping Tests ─────────────────────────────────

    #[test]
    fn test_success_range() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(199));
        assert!(!is_success(304));
        assert!(!is_success(500));
    }

    #[test]
    fn test_send_failure_is_network_class() {
        let err = send_error(gloo_net::Error::GlooError("fetch failed".to_string()));
        assert!(matches!(err, ChatError::Network(_)));
        assert_eq!(err.status(), Some(0));
        assert_eq!(err.detail(), "Network error - unable to reach server");
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = send_error(gloo_net::Error::SerdeError(serde_err));
        assert!(matches!(err, ChatError::Serialization(_)));
        assert_eq!(err.status(), None);
    }
}
