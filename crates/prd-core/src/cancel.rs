//! Cooperative cancellation for streaming calls.
//!
//! `CancelToken::pair()` splits into a `CancelHandle`, kept by whoever may
//! stop the operation, and a `CancelToken`, moved into the transport call.
//! The token covers both phases of a call: `guard` races the connect phase
//! (nothing has been returned yet) and `bind` wraps the resulting stream.
//! A bound stream stops yielding as soon as the handle fires and ends with a
//! single `Err(ChatError::Cancelled)` so consumers can tell a stop from a
//! normal end of stream.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{self, AbortHandle, AbortRegistration, Abortable, Aborted};
use futures::stream::{self, LocalBoxStream, Stream, StreamExt};
use prd_types::{ChatError, Result};

/// One flag plus every abort handle registered against it.
#[derive(Debug, Default)]
struct CancelState {
    cancelled: Cell<bool>,
    registered: RefCell<Vec<AbortHandle>>,
}

impl CancelState {
    /// A registration that is already aborted if the pair was cancelled.
    fn register(&self) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        if self.cancelled.get() {
            handle.abort();
        } else {
            self.registered.borrow_mut().push(handle);
        }
        registration
    }
}

/// Abort side of a cancellation pair.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    state: Rc<CancelState>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
        for handle in self.state.registered.borrow_mut().drain(..) {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }
}

/// Registration side of a cancellation pair, consumed by the transport.
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Rc<CancelState>,
}

impl CancelToken {
    pub fn pair() -> (CancelHandle, CancelToken) {
        let state = Rc::new(CancelState::default());
        (
            CancelHandle { state: state.clone() },
            CancelToken { state },
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Run `fut` until it completes or the pair is cancelled, whichever
    /// comes first. On cancellation `fut` is dropped unfinished and the
    /// result is `Err(ChatError::Cancelled)`.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match Abortable::new(fut, self.state.register()).await {
            Ok(result) => result,
            Err(Aborted) => Err(ChatError::Cancelled),
        }
    }

    /// Wrap a fragment stream so it stops on cancellation and reports it.
    pub fn bind<S>(self, inner: S) -> LocalBoxStream<'static, Result<String>>
    where
        S: Stream<Item = Result<String>> + 'static,
    {
        let registration = self.state.register();
        let state = self.state;
        let marker = stream::once(async move {
            if state.cancelled.get() {
                Some(Err(ChatError::Cancelled))
            } else {
                None
            }
        })
        .filter_map(future::ready);

        Abortable::new(inner, registration).chain(marker).boxed_local()
    }
}
