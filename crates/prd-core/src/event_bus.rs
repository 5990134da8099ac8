//! Event bus between the chat controller and the UI.
//!
//! Events queue up in a shared `VecDeque` and the UI drains them once per
//! frame. A long stream produces one `ContentUpdated` per fragment; only the
//! newest one per project is kept between drains.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use prd_types::event::ChatEvent;

/// Clones share one queue.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::default(),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        let mut queue = self.inner.borrow_mut();
        if let ChatEvent::ContentUpdated { project, .. } = &event {
            let stale = queue.iter().position(|e| {
                matches!(e, ChatEvent::ContentUpdated { project: p, .. } if p == project)
            });
            if let Some(index) = stale {
                queue.remove(index);
            }
        }
        queue.push_back(event);
    }

    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
