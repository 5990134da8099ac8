//! Chat controller: the send-message state machine.
//!
//! One send per conversation at a time:
//! 1. Append the user message and an empty assistant placeholder
//! 2. Open a cancellation pair and start the streaming call
//! 3. Apply every fragment to the placeholder as full accumulated text
//! 4. Settle as finished, cancelled or failed and release the guard
//!
//! Partial content is never replaced by an error string; the error is kept
//! out of band in the conversation's error slot.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use futures::StreamExt;
use prd_types::{
    ApiError, ChatError, Result,
    event::ChatEvent,
    message::{ChatRequest, Message, NewMessage},
    project::{HealthStatus, Project, ProjectId, ProjectUpdateRequest},
};

use crate::cancel::{CancelHandle, CancelToken};
use crate::conversation::ConversationStore;
use crate::event_bus::EventBus;
use crate::ports::ChatTransport;
use crate::projects::ProjectDirectory;

/// Where a conversation is in the send cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    /// User message appended
    Sending,
    /// Placeholder appended, fragments being applied
    Streaming,
}

/// How an accepted or rejected `send_message` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Ignored(IgnoreReason),
    Completed { content: String },
    Cancelled { partial: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyMessage,
    NoActiveProject,
    AlreadySending,
}

/// Snapshot of the active conversation for presentation layers
#[derive(Debug, Clone, Default)]
pub struct ConversationView {
    pub project: Option<ProjectId>,
    pub messages: Vec<Rc<Message>>,
    pub is_streaming: bool,
    pub is_resetting: bool,
    pub error: Option<ApiError>,
    pub needs_refresh: bool,
}

struct Inner {
    transport: Rc<dyn ChatTransport>,
    store: RefCell<ConversationStore>,
    directory: RefCell<ProjectDirectory>,
    phases: RefCell<HashMap<ProjectId, SendPhase>>,
    cancels: RefCell<HashMap<ProjectId, CancelHandle>>,
    errors: RefCell<HashMap<ProjectId, ApiError>>,
    resetting: RefCell<HashSet<ProjectId>>,
    needs_refresh: RefCell<HashSet<ProjectId>>,
    events: EventBus,
}

impl Inner {
    fn cancel_all(&self) {
        for (key, handle) in self.cancels.borrow_mut().drain() {
            log::debug!("Cancelling outstanding stream for {}", key);
            handle.cancel();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Releases the single-flight guard however the send ends,
/// including when the send future is dropped mid-stream.
struct SendGuard<'a> {
    inner: &'a Inner,
    key: ProjectId,
}

impl SendGuard<'_> {
    fn set_phase(&self, phase: SendPhase) {
        self.inner.phases.borrow_mut().insert(self.key.clone(), phase);
    }
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        self.inner.phases.borrow_mut().remove(&self.key);
        self.inner.cancels.borrow_mut().remove(&self.key);
    }
}

/// Marks one conversation as resetting until dropped.
struct ResetGuard<'a> {
    inner: &'a Inner,
    key: ProjectId,
}

impl<'a> ResetGuard<'a> {
    fn begin(inner: &'a Inner, key: ProjectId) -> Self {
        inner.resetting.borrow_mut().insert(key.clone());
        Self { inner, key }
    }
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        self.inner.resetting.borrow_mut().remove(&self.key);
    }
}

/// Shared controller, clone-cheap via Rc.
#[derive(Clone)]
pub struct ChatController {
    inner: Rc<Inner>,
}

impl ChatController {
    pub fn new(transport: Rc<dyn ChatTransport>, events: EventBus) -> Self {
        Self {
            inner: Rc::new(Inner {
                transport,
                store: RefCell::new(ConversationStore::new()),
                directory: RefCell::new(ProjectDirectory::new()),
                phases: RefCell::new(HashMap::new()),
                cancels: RefCell::new(HashMap::new()),
                errors: RefCell::new(HashMap::new()),
                resetting: RefCell::new(HashSet::new()),
                needs_refresh: RefCell::new(HashSet::new()),
                events,
            }),
        }
    }

    // ─── Sending ─────────────────────────────────────────────

    /// Send a message in the active project's conversation.
    ///
    /// Empty input, no active project, or a send already in flight for the
    /// same conversation make this a no-op (`SendOutcome::Ignored`).
    /// Cancellation is `Ok(SendOutcome::Cancelled)`; only real failures are `Err`.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome> {
        let inner = &*self.inner;
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored(IgnoreReason::EmptyMessage));
        }
        let Some(key) = inner.directory.borrow().active().cloned() else {
            return Ok(SendOutcome::Ignored(IgnoreReason::NoActiveProject));
        };
        if inner.phases.borrow().contains_key(&key) {
            log::debug!("Send for {} dropped: already in flight", key);
            return Ok(SendOutcome::Ignored(IgnoreReason::AlreadySending));
        }

        let guard = SendGuard { inner, key: key.clone() };
        guard.set_phase(SendPhase::Sending);
        inner.errors.borrow_mut().remove(&key);
        inner.store.borrow_mut().append(&key, NewMessage::user(text));

        inner.store.borrow_mut().append(&key, NewMessage::placeholder());
        guard.set_phase(SendPhase::Streaming);

        let (handle, token) = CancelToken::pair();
        if let Some(stale) = inner.cancels.borrow_mut().insert(key.clone(), handle.clone()) {
            log::warn!("Stale cancel handle for {}, aborting it", key);
            stale.cancel();
        }
        inner.events.emit(ChatEvent::SendStarted { project: key.clone() });

        let request = ChatRequest::new(text, Some(key.to_string()));
        let mut accumulated = String::new();
        let result = self.stream_into(&key, request, token, &mut accumulated).await;

        match result {
            Ok(()) => {
                log::info!("Stream for {} finished ({} bytes)", key, accumulated.len());
                inner.events.emit(ChatEvent::SendFinished { project: key });
                Ok(SendOutcome::Completed { content: accumulated })
            }
            Err(e) if e.is_cancelled() || handle.is_cancelled() => {
                log::info!("Stream for {} cancelled after {} bytes", key, accumulated.len());
                inner.events.emit(ChatEvent::SendCancelled { project: key });
                Ok(SendOutcome::Cancelled { partial: accumulated })
            }
            Err(e) => {
                log::error!("Chat error for {}: {}", key, e);
                let record = ApiError::from(&e);
                inner.errors.borrow_mut().insert(key.clone(), record.clone());
                inner.events.emit(ChatEvent::SendFailed { project: key, error: record });
                Err(e)
            }
        }
    }

    async fn stream_into(
        &self,
        key: &ProjectId,
        request: ChatRequest,
        token: CancelToken,
        accumulated: &mut String,
    ) -> Result<()> {
        let inner = &*self.inner;
        // The connect phase yields no stream yet, so race it against the token.
        let connect = token.clone();
        let mut fragments = connect.guard(inner.transport.stream_chat(request, token)).await?;

        while let Some(item) = fragments.next().await {
            let fragment = item?;
            accumulated.push_str(&fragment);
            inner.store.borrow_mut().update_last_assistant_content(key, accumulated);
            inner.events.emit(ChatEvent::ContentUpdated {
                project: key.clone(),
                len: accumulated.len(),
            });
        }
        Ok(())
    }

    /// Stop the stream of one conversation. Returns whether one was running.
    pub fn cancel(&self, key: &ProjectId) -> bool {
        match self.inner.cancels.borrow().get(key) {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Teardown: abort every outstanding stream.
    pub fn shutdown(&self) {
        self.inner.cancel_all();
    }

    // ─── Reset ───────────────────────────────────────────────

    /// Clear the active conversation on the server, then locally.
    /// Without an active project this does nothing.
    pub async fn reset_chat(&self) -> Result<()> {
        let inner = &*self.inner;
        let Some(key) = inner.directory.borrow().active().cloned() else {
            return Ok(());
        };

        let resetting = ResetGuard::begin(inner, key.clone());
        let result = inner.transport.reset_conversation().await;
        drop(resetting);

        if let Err(e) = result {
            log::error!("Reset failed for {}: {}", key, e);
            inner.errors.borrow_mut().insert(key, ApiError::from(&e));
            return Err(e);
        }

        self.cancel(&key);
        inner.store.borrow_mut().clear(&key);
        inner.errors.borrow_mut().remove(&key);
        inner.needs_refresh.borrow_mut().insert(key.clone());
        inner.events.emit(ChatEvent::ConversationReset { project: key });
        Ok(())
    }

    // ─── Projects ────────────────────────────────────────────

    pub async fn check_health(&self) -> Result<HealthStatus> {
        self.inner.transport.check_health().await
    }

    pub async fn load_projects(&self) -> Result<Vec<Project>> {
        let projects = self.inner.transport.list_projects().await?;
        log::info!("Loaded {} projects", projects.len());
        self.inner.directory.borrow_mut().replace_all(projects.clone());
        self.inner.events.emit(ChatEvent::ProjectsChanged);
        Ok(projects)
    }

    /// Create a project on the server and make it current.
    pub async fn create_project(&self, name: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChatError::Other("Project name must not be empty".to_string()));
        }
        let project = self.inner.transport.create_project(name, None).await?;
        self.inner.directory.borrow_mut().insert(project.clone());
        self.inner.events.emit(ChatEvent::ProjectsChanged);
        Ok(project)
    }

    pub async fn update_project(
        &self,
        id: &ProjectId,
        update: ProjectUpdateRequest,
    ) -> Result<Project> {
        let project = self.inner.transport.update_project(id, update).await?;
        self.inner.directory.borrow_mut().upsert(project.clone());
        self.inner.events.emit(ChatEvent::ProjectsChanged);
        Ok(project)
    }

    /// Re-fetch one project, e.g. to pick up a regenerated document.
    pub async fn refresh_project(&self, id: &ProjectId) -> Result<Project> {
        let project = self.inner.transport.get_project(id).await?;
        self.inner.directory.borrow_mut().upsert(project.clone());
        self.inner.events.emit(ChatEvent::ProjectsChanged);
        Ok(project)
    }

    /// Delete on the server, then forget the project locally.
    pub async fn delete_project(&self, id: &ProjectId) -> Result<()> {
        self.inner.transport.delete_project(id).await?;
        self.forget_project(id);
        Ok(())
    }

    /// Drop a project and everything keyed by it: selection, conversation,
    /// error slot and any in-flight stream.
    pub fn forget_project(&self, id: &ProjectId) {
        let inner = &*self.inner;
        self.cancel(id);
        inner.directory.borrow_mut().remove(id);
        inner.store.borrow_mut().discard(id);
        inner.errors.borrow_mut().remove(id);
        inner.needs_refresh.borrow_mut().remove(id);
        inner.events.emit(ChatEvent::ProjectsChanged);
    }

    pub fn select_project(&self, id: &ProjectId) -> bool {
        let selected = self.inner.directory.borrow_mut().select(id);
        if selected {
            self.inner.events.emit(ChatEvent::ProjectsChanged);
        }
        selected
    }

    // ─── Queries ─────────────────────────────────────────────

    pub fn active_project(&self) -> Option<Project> {
        self.inner.directory.borrow().active_project().cloned()
    }

    pub fn active_project_id(&self) -> Option<ProjectId> {
        self.inner.directory.borrow().active().cloned()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.inner.directory.borrow().list().to_vec()
    }

    pub fn messages_for(&self, key: Option<&ProjectId>) -> Vec<Rc<Message>> {
        self.inner.store.borrow().messages_for(key)
    }

    pub fn phase(&self, key: &ProjectId) -> SendPhase {
        self.inner
            .phases
            .borrow()
            .get(key)
            .copied()
            .unwrap_or(SendPhase::Idle)
    }

    pub fn is_streaming(&self, key: &ProjectId) -> bool {
        self.phase(key) != SendPhase::Idle
    }

    pub fn last_error(&self, key: &ProjectId) -> Option<ApiError> {
        self.inner.errors.borrow().get(key).cloned()
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn is_resetting(&self, key: &ProjectId) -> bool {
        self.inner.resetting.borrow().contains(key)
    }

    /// Clear the "needs refresh" flag a reset raised for this project.
    pub fn acknowledge_refresh(&self, key: &ProjectId) {
        self.inner.needs_refresh.borrow_mut().remove(key);
    }

    /// View model for the active conversation.
    pub fn view(&self) -> ConversationView {
        let project = self.active_project_id();
        ConversationView {
            messages: self.messages_for(project.as_ref()),
            is_streaming: project.as_ref().is_some_and(|p| self.is_streaming(p)),
            is_resetting: project.as_ref().is_some_and(|p| self.is_resetting(p)),
            error: project.as_ref().and_then(|p| self.last_error(p)),
            needs_refresh: project
                .as_ref()
                .is_some_and(|p| self.inner.needs_refresh.borrow().contains(p)),
            project,
        }
    }
}
