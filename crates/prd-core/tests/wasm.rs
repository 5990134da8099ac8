//! WASM-target tests for prd-core.
//!
//! Runs the frame parser, EventBus and ChatController under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;

use async_trait::async_trait;
use futures::stream;
use wasm_bindgen_test::*;

use prd_core::cancel::CancelToken;
use prd_core::controller::{ChatController, SendOutcome};
use prd_core::event_bus::EventBus;
use prd_core::frame::{extract_frames, Utf8Decoder};
use prd_core::ports::{ChatTransport, FragmentStream};
use prd_types::event::ChatEvent;
use prd_types::message::{ChatRequest, Role};
use prd_types::project::{HealthStatus, Project, ProjectId, ProjectUpdateRequest};
use prd_types::{ChatError, Result};

// ─── Frame Parser Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn frames_split_across_reads() {
    let first = extract_frames("", "data: Hel");
    assert!(first.fragments.is_empty());
    let second = extract_frames(&first.remainder, "lo\ndata: [DONE]\n");
    assert_eq!(second.fragments, vec!["Hello"]);
    assert!(second.done);
}

#[wasm_bindgen_test]
fn decoder_joins_split_char() {
    let bytes = "ü".as_bytes();
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(&bytes[..1]), "");
    assert_eq!(decoder.decode(&bytes[1..]), "ü");
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_coalesces_content_updates() {
    let bus = EventBus::new();
    let project = ProjectId::from("p1");
    bus.emit(ChatEvent::ContentUpdated { project: project.clone(), len: 1 });
    bus.emit(ChatEvent::ContentUpdated { project: project.clone(), len: 5 });
    assert_eq!(bus.drain(), vec![ChatEvent::ContentUpdated { project, len: 5 }]);
    assert!(bus.is_empty());
}

// ─── ChatController Tests ────────────────────────────────

struct CannedTransport {
    reply: Vec<&'static str>,
    requests: RefCell<Vec<ChatRequest>>,
}

fn project(id: &str) -> Project {
    Project {
        id: ProjectId::from(id),
        name: id.to_string(),
        prd: None,
        created_at: chrono::Utc::now(),
        updated_at: None,
    }
}

#[async_trait(?Send)]
impl ChatTransport for CannedTransport {
    async fn check_health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus { status: "ok".to_string() })
    }

    async fn reset_conversation(&self) -> Result<()> {
        Ok(())
    }

    async fn stream_chat(&self, req: ChatRequest, cancel: CancelToken) -> Result<FragmentStream> {
        self.requests.borrow_mut().push(req);
        let items: Vec<Result<String>> = self.reply.iter().map(|s| Ok(s.to_string())).collect();
        Ok(cancel.bind(stream::iter(items)))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(vec![project("p1")])
    }

    async fn create_project(&self, name: &str, _prd: Option<&str>) -> Result<Project> {
        Ok(project(name))
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project> {
        Ok(project(id.as_str()))
    }

    async fn update_project(&self, id: &ProjectId, _update: ProjectUpdateRequest) -> Result<Project> {
        Ok(project(id.as_str()))
    }

    async fn delete_project(&self, _id: &ProjectId) -> Result<()> {
        Err(ChatError::Other("not supported".to_string()))
    }
}

#[wasm_bindgen_test]
async fn controller_streams_reply_into_placeholder() {
    let transport = std::rc::Rc::new(CannedTransport {
        reply: vec!["Hello", " there"],
        requests: RefCell::new(Vec::new()),
    });
    let controller = ChatController::new(transport.clone(), EventBus::new());
    controller.load_projects().await.unwrap();
    assert!(controller.select_project(&ProjectId::from("p1")));

    let outcome = controller.send_message("  hi  ").await.unwrap();
    assert_eq!(outcome, SendOutcome::Completed { content: "Hello there".to_string() });

    let messages = controller.messages_for(Some(&ProjectId::from("p1")));
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "hi");
    assert_eq!(messages[1].content, "Hello there");

    let requests = transport.requests.borrow();
    assert_eq!(requests[0].project_id.as_deref(), Some("p1"));
}

#[wasm_bindgen_test]
async fn controller_ignores_send_without_project() {
    let transport = std::rc::Rc::new(CannedTransport {
        reply: vec!["unused"],
        requests: RefCell::new(Vec::new()),
    });
    let controller = ChatController::new(transport.clone(), EventBus::new());
    let outcome = controller.send_message("hi").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Ignored(_)));
    assert!(transport.requests.borrow().is_empty());
    assert!(controller.events().drain().is_empty());
}
