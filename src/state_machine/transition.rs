//! Pure state transition function
//!
//! Given the same state and event this always produces the same result and
//! performs no I/O. Rejected events leave the caller's state untouched.

use super::{ChatEvent, ChatState};
use thiserror::Error;

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("A reply is still in progress ({0}); wait for it to finish")]
    Busy(ChatState),
    #[error("Invalid transition: {event} while {state}")]
    InvalidTransition { state: ChatState, event: ChatEvent },
}

pub fn transition(state: ChatState, event: ChatEvent) -> Result<ChatState, TransitionError> {
    match (state, event) {
        // Submission is accepted from rest states only; error recovers here
        (ChatState::Idle | ChatState::Error, ChatEvent::Submit) => Ok(ChatState::Loading),

        (ChatState::Loading | ChatState::Streaming, ChatEvent::Submit | ChatEvent::Reset) => {
            Err(TransitionError::Busy(state))
        }

        (ChatState::Loading | ChatState::Streaming, ChatEvent::Delta) => Ok(ChatState::Streaming),

        (ChatState::Loading | ChatState::Streaming, ChatEvent::Completed) => Ok(ChatState::Idle),

        (ChatState::Loading | ChatState::Streaming, ChatEvent::Failed) => Ok(ChatState::Error),

        (ChatState::Idle | ChatState::Error, ChatEvent::Reset) => Ok(ChatState::Idle),

        (
            ChatState::Idle | ChatState::Error,
            ChatEvent::Delta | ChatEvent::Completed | ChatEvent::Failed,
        ) => Err(TransitionError::InvalidTransition { state, event }),
    }
}
