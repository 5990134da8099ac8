//! Request deadline.

use std::future::Future;

use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use prd_types::{ChatError, Result};

/// Race `fut` against a browser timer. The loser is dropped; a timeout
/// becomes `ChatError::Timeout`, which reports as network-class.
pub async fn with_timeout<T, F>(timeout_ms: u64, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let timer = TimeoutFuture::new(u32::try_from(timeout_ms).unwrap_or(u32::MAX));
    match future::select(Box::pin(fut), Box::pin(timer)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ChatError::Timeout(timeout_ms)),
    }
}
