//! Conversation bookkeeping for the chat view.
//!
//! One authoritative value holds every conversation plus the selection;
//! the view keeps it in a single signal and mutates it in place. Replies
//! are delivered by conversation id, so an answer that arrives after the
//! user switched away still lands in the conversation that asked, and an
//! answer for a deleted conversation is dropped.

use crate::types::{Conversation, Message, Role};
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversationList {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    next_conversation_id: u64,
    next_message_id: u64,
}

impl ConversationList {
    /// One selected empty conversation, the state the chat view boots into.
    pub fn seeded() -> Self {
        let mut list = Self::default();
        list.create();
        list
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        let id = self.active_id.as_deref()?;
        self.conversations
            .iter()
            .find(|conversation| conversation.id == id)
    }

    /// Appends a new conversation, numbered after the first, and selects it.
    pub fn create(&mut self) -> String {
        let title = if self.conversations.is_empty() {
            "New Conversation".to_string()
        } else {
            format!("New Conversation {}", self.conversations.len() + 1)
        };
        let id = self.mint_conversation_id();
        self.conversations.push(Conversation {
            id: id.clone(),
            title,
            messages: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        });
        self.active_id = Some(id.clone());
        id
    }

    /// Selection only ever moves to a conversation that exists.
    pub fn select(&mut self, id: &str) {
        if self
            .conversations
            .iter()
            .any(|conversation| conversation.id == id)
        {
            self.active_id = Some(id.to_string());
        }
    }

    /// Removes a conversation. Deleting the active one falls back to the
    /// first remaining conversation; deleting the last leaves nothing
    /// selected.
    pub fn delete(&mut self, id: &str) {
        self.conversations.retain(|conversation| conversation.id != id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self
                .conversations
                .first()
                .map(|conversation| conversation.id.clone());
        }
    }

    /// Appends a message to the conversation with `conversation_id`.
    /// Returns `false` when that conversation no longer exists; the message
    /// is dropped, never rerouted.
    pub fn push_message(&mut self, conversation_id: &str, role: Role, content: String) -> bool {
        let Some(index) = self
            .conversations
            .iter()
            .position(|conversation| conversation.id == conversation_id)
        else {
            return false;
        };
        let id = self.mint_message_id();
        self.conversations[index].messages.push(Message {
            id,
            role,
            content,
            timestamp: OffsetDateTime::now_utc(),
        });
        true
    }

    fn mint_conversation_id(&mut self) -> String {
        self.next_conversation_id += 1;
        format!("c{}", self.next_conversation_id)
    }

    fn mint_message_id(&mut self) -> String {
        self.next_message_id += 1;
        format!("m{}", self.next_message_id)
    }
}
