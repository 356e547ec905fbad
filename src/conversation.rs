//! Conversation store: the transcript and lifecycle state the UI renders
//!
//! The transcript is append-only. The only way to change an existing entry
//! is [`ConversationStore::update_message_content`], and the only way to
//! remove entries is [`ConversationStore::reset`].

mod message;
mod store;

#[cfg(test)]
mod proptests;

pub use message::Message;
pub use store::{ConversationStore, StoreError};
