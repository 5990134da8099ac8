use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    /// Enables verbose request/response logging (debug builds only)
    pub dev_mode: bool,
    /// Input boundary limit; longer input is truncated by the UI
    pub max_message_chars: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dev_mode: cfg!(debug_assertions),
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }
}

impl ClientConfig {
    /// Defaults plus build-time overrides (`PRD_API_URL`, `PRD_API_PORT`, `PRD_DEV_MODE`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(
            option_env!("PRD_API_URL"),
            option_env!("PRD_API_PORT"),
            option_env!("PRD_DEV_MODE"),
        );
        config
    }

    /// Apply string overrides. Empty or unparsable values are ignored.
    pub fn apply_overrides(
        &mut self,
        api_url: Option<&str>,
        api_port: Option<&str>,
        dev_mode: Option<&str>,
    ) {
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = Some(url.to_string());
        }
        if let Some(port) = api_port.map(str::trim).filter(|p| !p.is_empty()) {
            match port.parse::<u16>() {
                Ok(p) => self.api.port = Some(p),
                Err(_) => log::warn!("Ignoring invalid API port override {:?}", port),
            }
        }
        if let Some(flag) = dev_mode {
            self.dev_mode = matches!(flag.trim(), "1" | "true" | "yes");
        }
    }

    /// Verbose logging never runs in release builds, whatever the flag says.
    pub fn verbose_logging(&self) -> bool {
        self.dev_mode && cfg!(debug_assertions)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full base URL; takes precedence over `port`
    pub base_url: Option<String>,
    /// Port for the default local URL
    pub port: Option<u16>,
    /// Upper bound for non-streaming calls
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            port: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port.unwrap_or(DEFAULT_PORT)),
        }
    }

    /// Absolute URL for an `/api`-rooted path such as `/chat/stream`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.resolved_base_url(), path)
    }
}
