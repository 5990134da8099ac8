//! Browser adapters for the PRD chat core.
//!
//! Implements the `prd-core` port traits on top of `fetch()`,
//! `ReadableStream` and `AbortController`.

pub mod http;

#[cfg(test)]
mod tests;

pub use http::{with_timeout, FetchBodyReader, HttpTransport};
