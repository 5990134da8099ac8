//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `prd-core` (pure Rust).
//! Implementations live in `prd-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use futures::stream::LocalBoxStream;
use prd_types::{
    Result,
    message::ChatRequest,
    project::{HealthStatus, Project, ProjectId, ProjectUpdateRequest},
};

use crate::cancel::CancelToken;

/// Lazy sequence of decoded content fragments for one chat call.
/// Ends with `Err(ChatError::Cancelled)` when the call was cancelled.
pub type FragmentStream = LocalBoxStream<'static, Result<String>>;

// ─── Transport Port ──────────────────────────────────────────

#[async_trait(?Send)]
pub trait ChatTransport {
    /// Server health check
    async fn check_health(&self) -> Result<HealthStatus>;

    /// Clear server-side chat state
    async fn reset_conversation(&self) -> Result<()>;

    /// Start a streaming chat call. Fails up front if the request could not
    /// be issued or the server answered non-2xx; read failures surface as
    /// `Err` items on the stream.
    async fn stream_chat(&self, req: ChatRequest, cancel: CancelToken) -> Result<FragmentStream>;

    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn create_project(&self, name: &str, prd: Option<&str>) -> Result<Project>;

    async fn get_project(&self, id: &ProjectId) -> Result<Project>;

    async fn update_project(&self, id: &ProjectId, update: ProjectUpdateRequest) -> Result<Project>;

    async fn delete_project(&self, id: &ProjectId) -> Result<()>;
}

// ─── Body Reader Port ────────────────────────────────────────

/// One response body, read chunk by chunk.
#[async_trait(?Send)]
pub trait BodyReader {
    /// Read the next chunk; `Ok(None)` once the body is exhausted.
    async fn read_chunk(&mut self) -> Result<Option<Vec<u8>>>;
}
