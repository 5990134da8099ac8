pub mod chat;
pub mod preview;
pub mod projects;

pub use chat::{chat_panel, ChatAction};
pub use preview::prd_preview;
pub use projects::{projects_panel, ProjectAction};
