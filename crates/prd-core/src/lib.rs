//! Streaming chat core for the PRD client.
//!
//! Frame parsing, the fragment stream driver, the per-project conversation
//! store and the send-message controller. Platform code plugs in through
//! the traits in [`ports`].

pub mod cancel;
pub mod controller;
pub mod conversation;
pub mod event_bus;
pub mod frame;
pub mod ports;
pub mod projects;
pub mod stream;


pub use cancel::{CancelHandle, CancelToken};
pub use controller::{ChatController, ConversationView, IgnoreReason, SendOutcome, SendPhase};
pub use ports::{BodyReader, ChatTransport, FragmentStream};
