//! Common types for upstream chat sessions

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::LlmError;

/// Ordered, single-use sequence of text fragments for one message.
///
/// Fragments are increments, not cumulative text. The stream ends after
/// the first `Err`.
pub type FragmentStream = BoxStream<'static, Result<String, LlmError>>;

/// Settings fixed when an upstream session is created
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub system_instruction: String,
    pub temperature: f32,
}

impl SessionOptions {
    pub fn new(system_instruction: impl Into<String>, temperature: f32) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            temperature,
        }
    }
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One completed exchange half kept as multi-turn context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
        }
    }
}
