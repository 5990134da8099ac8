pub mod message;
pub mod event;
pub mod project;
pub mod config;
pub mod error;


pub use error::{ApiError, ChatError};
pub type Result<T> = std::result::Result<T, ChatError>;
