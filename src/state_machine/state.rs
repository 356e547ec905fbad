//! Chat lifecycle state

use serde::{Deserialize, Serialize};

/// Exactly one of these is active at a time; it is not per-message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    #[default]
    Idle,
    /// Message sent, no reply text yet
    Loading,
    /// Reply text is arriving
    Streaming,
    /// The last send failed
    Error,
}

impl ChatState {
    /// A send is in flight
    pub fn is_busy(self) -> bool {
        matches!(self, ChatState::Loading | ChatState::Streaming)
    }

    /// Input box, send button and quick actions are enabled
    pub fn accepts_input(self) -> bool {
        !self.is_busy()
    }

    pub fn shows_typing_indicator(self) -> bool {
        self == ChatState::Loading
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::Loading => "loading",
            ChatState::Streaming => "streaming",
            ChatState::Error => "error",
        }
    }
}

impl std::fmt::Display for ChatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
