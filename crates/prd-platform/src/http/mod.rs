//! Fetch-based transport.

mod body;
mod client;
mod timeout;

pub use body::FetchBodyReader;
pub use client::HttpTransport;
pub use timeout::with_timeout;

#[cfg(test)]
pub(crate) use client::{is_success, project_path, send_error, Verb};
