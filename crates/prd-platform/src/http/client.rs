//! HTTP transport for the PRD backend.
//!
//! Uses browser `fetch()` via gloo-net. Every endpoint lives under
//! `{base_url}/api`. Simple calls are bounded by the configured request
//! timeout; the streaming call is bounded only by the server, the reader,
//! or the caller's cancel handle, which also covers the wait for headers.

use std::future::Future;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{AbortController, AbortSignal};

use prd_core::cancel::CancelToken;
use prd_core::ports::{ChatTransport, FragmentStream};
use prd_core::stream::fragment_stream;
use prd_types::{
    ChatError, Result,
    config::ClientConfig,
    error::ErrorBody,
    message::ChatRequest,
    project::{
        HealthStatus, Project, ProjectCreateRequest, ProjectId, ProjectRecord,
        ProjectUpdateRequest,
    },
};

use super::body::{js_error_message, FetchBodyReader};
use super::timeout::with_timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Verb::Get => Request::get(url),
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Delete => Request::delete(url),
        }
    }
}

/// `ChatTransport` over browser fetch.
pub struct HttpTransport {
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        log::info!("PRD API at {}", config.api.resolved_base_url());
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.config.api.endpoint(path)
    }

    fn trace_request(&self, verb: Verb, url: &str) {
        if self.config.verbose_logging() {
            log::debug!("→ {} {}", verb.as_str(), url);
        }
    }

    fn trace_response(&self, verb: Verb, url: &str, status: u16) {
        if self.config.verbose_logging() {
            log::debug!("← {} {} {}", status, verb.as_str(), url);
        }
    }

    /// Race `fut` against the request timeout. On timeout the fetch is
    /// aborted and the call fails with a network-class error.
    async fn timed<T, F>(&self, controller: &AbortController, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let result = with_timeout(self.config.api.request_timeout_ms, fut).await;
        if let Err(ChatError::Timeout(ms)) = &result {
            controller.abort();
            log::warn!("Request timed out after {}ms", ms);
        }
        result
    }

    /// Issue a non-streaming request and return the raw body of a 2xx
    /// response. Non-2xx responses become `ChatError::Server`.
    async fn execute(&self, verb: Verb, path: &str, body: Option<String>) -> Result<String> {
        let url = self.url(path);
        let controller = abort_controller()?;
        self.trace_request(verb, &url);

        let builder = verb.builder(&url).abort_signal(Some(&controller.signal()));
        let request = match body {
            Some(json) => builder.header("Content-Type", "application/json").body(json),
            None => builder.build(),
        }
        .map_err(send_error)?;

        let exchange = async {
            let response = request.send().await.map_err(send_error)?;
            let status = response.status();
            let text = response.text().await.map_err(send_error)?;
            Ok::<_, ChatError>((status, text))
        };
        let (status, text) = self.timed(&controller, exchange).await?;
        self.trace_response(verb, &url, status);

        if is_success(status) {
            Ok(text)
        } else {
            Err(ErrorBody::into_server_error(status, &text))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.execute(Verb::Get, path, None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_json<B, T>(&self, verb: Verb, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(body)?;
        let text = self.execute(verb, path, Some(payload)).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpTransport {
    async fn check_health(&self) -> Result<HealthStatus> {
        self.get_json("/health").await
    }

    async fn reset_conversation(&self) -> Result<()> {
        self.execute(Verb::Post, "/chat/reset", None).await?;
        Ok(())
    }

    async fn stream_chat(&self, req: ChatRequest, cancel: CancelToken) -> Result<FragmentStream> {
        let url = self.url("/chat/stream");
        let pending = PendingFetch::start()?;
        self.trace_request(Verb::Post, &url);

        let request = Request::post(&url)
            .header("Accept", "text/event-stream")
            .abort_signal(Some(&pending.signal()))
            .json(&req)
            .map_err(send_error)?;

        // Losing to the token drops `pending`, which aborts the fetch.
        let response = cancel
            .guard(async { request.send().await.map_err(send_error) })
            .await?;

        let status = response.status();
        self.trace_response(Verb::Post, &url, status);

        if !is_success(status) {
            let raw = cancel
                .guard(async { Ok(response.text().await.unwrap_or_default()) })
                .await?;
            return Err(ErrorBody::into_server_error(status, &raw));
        }

        let body = response
            .body()
            .ok_or_else(|| ChatError::Network("Response has no body".to_string()))?;

        Ok(fragment_stream(FetchBodyReader::new(body, pending.hand_off()), cancel))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let records: Vec<ProjectRecord> = self.get_json("/projects").await?;
        Ok(records.into_iter().map(ProjectRecord::into_project).collect())
    }

    async fn create_project(&self, name: &str, prd: Option<&str>) -> Result<Project> {
        let body = ProjectCreateRequest {
            name: name.to_string(),
            prd: prd.map(str::to_string),
        };
        let record: ProjectRecord = self.send_json(Verb::Post, "/projects", &body).await?;
        Ok(record.into_project())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project> {
        let record: ProjectRecord = self.get_json(&project_path(id)).await?;
        Ok(record.into_project())
    }

    async fn update_project(&self, id: &ProjectId, update: ProjectUpdateRequest) -> Result<Project> {
        let record: ProjectRecord = self.send_json(Verb::Put, &project_path(id), &update).await?;
        Ok(record.into_project())
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<()> {
        self.execute(Verb::Delete, &project_path(id), None).await?;
        Ok(())
    }
}

// ─── Helpers ─────────────────────────────────────────────────

pub(crate) fn project_path(id: &ProjectId) -> String {
    format!("/projects/{}", id)
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn abort_controller() -> Result<AbortController> {
    AbortController::new().map_err(|e| ChatError::Other(js_error_message(&e)))
}

/// A fetch that has not produced a body yet. Dropping it aborts the
/// request; `hand_off` passes the controller on to the body reader.
struct PendingFetch {
    controller: AbortController,
    armed: bool,
}

impl PendingFetch {
    fn start() -> Result<Self> {
        Ok(Self {
            controller: abort_controller()?,
            armed: true,
        })
    }

    fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    fn hand_off(mut self) -> AbortController {
        self.armed = false;
        self.controller.clone()
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("Aborting unfinished stream request");
            self.controller.abort();
        }
    }
}

/// Normalize a fetch failure. No response means network-class.
pub(crate) fn send_error(e: gloo_net::Error) -> ChatError {
    match e {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => ChatError::Cancelled,
        gloo_net::Error::SerdeError(e) => ChatError::Serialization(e.to_string()),
        other => {
            log::warn!("Request failed: {}", other);
            ChatError::Network(other.to_string())
        }
    }
}
