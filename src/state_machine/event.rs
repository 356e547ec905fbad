//! Events that drive the chat lifecycle

/// Something that happened to the single in-flight exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    /// The user submitted a message (typed or via a quick action)
    Submit,
    /// The upstream produced more reply text
    Delta,
    /// The reply stream ended normally
    Completed,
    /// The send failed
    Failed,
    /// The user asked to start over
    Reset,
}

impl ChatEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatEvent::Submit => "submit",
            ChatEvent::Delta => "delta",
            ChatEvent::Completed => "completed",
            ChatEvent::Failed => "failed",
            ChatEvent::Reset => "reset",
        }
    }
}

impl std::fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
