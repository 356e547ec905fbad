//! Transcript plus lifecycle state, mutated only through the operations below

use super::Message;
use crate::llm::MessageRole;
use crate::state_machine::ChatState;
use crate::system_prompt::{WELCOME_MESSAGE, WELCOME_MESSAGE_ID};
use thiserror::Error;

/// Why a user submission was refused. The transcript is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A reply is still in progress ({0})")]
    Busy(ChatState),
}

#[derive(Debug, Clone)]
pub struct ConversationStore {
    seed: Message,
    messages: Vec<Message>,
    lifecycle: ChatState,
}

impl ConversationStore {
    /// Store seeded with the standard welcome message
    pub fn new() -> Self {
        Self::with_welcome(WELCOME_MESSAGE)
    }

    pub fn with_welcome(welcome: impl Into<String>) -> Self {
        let seed = Message::with_id(WELCOME_MESSAGE_ID, MessageRole::Assistant, welcome);
        Self {
            messages: vec![seed.clone()],
            seed,
            lifecycle: ChatState::Idle,
        }
    }

    /// Transcript in display order; never empty
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn lifecycle(&self) -> ChatState {
        self.lifecycle
    }

    /// The entry every reset returns to
    pub fn seed(&self) -> &Message {
        &self.seed
    }

    /// Append a user entry and return its id.
    ///
    /// Refused for blank text, and while a reply is loading or streaming.
    pub fn append_user_message(&mut self, text: &str) -> Result<String, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        if self.lifecycle.is_busy() {
            return Err(StoreError::Busy(self.lifecycle));
        }
        Ok(self.push(Message::new(MessageRole::User, text)))
    }

    /// Append an empty assistant entry for a reply and return its id.
    pub fn append_placeholder_response(&mut self) -> String {
        self.push(Message::new(MessageRole::Assistant, String::new()))
    }

    /// Replace the content of entry `id`. Returns whether anything changed.
    ///
    /// No-op for unknown ids, for the seed entry, for user entries, and for
    /// assistant entries once the lifecycle is back to idle or error.
    pub fn update_message_content(&mut self, id: &str, content: &str) -> bool {
        let writable = self.lifecycle.is_busy() && id != self.seed.id;
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            tracing::debug!(id, "Ignoring update for unknown message");
            return false;
        };
        if message.role != MessageRole::Assistant || !writable {
            tracing::debug!(id, role = ?message.role, "Ignoring update for finalized message");
            return false;
        }
        message.content.clear();
        message.content.push_str(content);
        true
    }

    pub fn set_lifecycle(&mut self, state: ChatState) {
        self.lifecycle = state;
    }

    /// Truncate to the seed entry and go idle, whatever the current state.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(self.seed.clone());
        self.lifecycle = ChatState::Idle;
    }

    fn push(&mut self, message: Message) -> String {
        let id = message.id.clone();
        self.messages.push(message);
        id
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
