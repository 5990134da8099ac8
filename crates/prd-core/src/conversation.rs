//! Per-project conversation store.
//!
//! Each conversation is an ordered list of `Rc<Message>`. Updating the last
//! assistant message swaps only the tail `Rc`; every earlier entry keeps its
//! identity, so a renderer holding an older snapshot never sees it change.

use std::collections::HashMap;
use std::rc::Rc;

use prd_types::message::{generate_message_id, Message, NewMessage};
use prd_types::project::ProjectId;

#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: HashMap<ProjectId, Vec<Rc<Message>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an id and append. The conversation is created on first use.
    pub fn append(&mut self, key: &ProjectId, message: NewMessage) -> Rc<Message> {
        let stored = Rc::new(message.into_message(generate_message_id()));
        self.conversations
            .entry(key.clone())
            .or_default()
            .push(stored.clone());
        stored
    }

    /// Replace the content of the last message if it is an assistant
    /// message. Returns whether anything changed.
    pub fn update_last_assistant_content(&mut self, key: &ProjectId, content: &str) -> bool {
        let Some(messages) = self.conversations.get_mut(key) else {
            return false;
        };
        match messages.last_mut() {
            Some(last) if last.is_assistant() => {
                *last = Rc::new(last.with_content(content));
                true
            }
            _ => false,
        }
    }

    /// Empty a conversation, keeping the key.
    pub fn clear(&mut self, key: &ProjectId) {
        if let Some(messages) = self.conversations.get_mut(key) {
            messages.clear();
        }
    }

    /// Drop a conversation entirely (its project was deleted).
    pub fn discard(&mut self, key: &ProjectId) {
        self.conversations.remove(key);
    }

    /// Ordered snapshot; empty when there is no key or no conversation yet.
    pub fn messages_for(&self, key: Option<&ProjectId>) -> Vec<Rc<Message>> {
        key.and_then(|k| self.conversations.get(k))
            .cloned()
            .unwrap_or_default()
    }

    pub fn last_message(&self, key: &ProjectId) -> Option<Rc<Message>> {
        self.conversations.get(key).and_then(|m| m.last().cloned())
    }

    pub fn len(&self, key: &ProjectId) -> usize {
        self.conversations.get(key).map_or(0, Vec::len)
    }

    pub fn contains(&self, key: &ProjectId) -> bool {
        self.conversations.contains_key(key)
    }
}
