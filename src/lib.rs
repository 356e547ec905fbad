//! Pawcation Chat - streaming conversation core for a website chat widget
//!
//! A [`ChatWidget`] keeps the transcript and lifecycle state a UI renders,
//! and streams replies from a hosted chat model into it. The UI layer only
//! reads [`ChatWidget::transcript`] and [`ChatWidget::state`] and calls
//! [`ChatWidget::submit`] / [`ChatWidget::reset`].

pub mod config;
pub mod conversation;
pub mod llm;
pub mod logging;
pub mod session;
pub mod state_machine;
pub mod system_prompt;
pub mod widget;


pub use config::ChatConfig;
pub use conversation::{ConversationStore, Message, StoreError};
pub use llm::{LlmError, LlmErrorKind, MessageRole};
pub use session::StreamingSession;
pub use state_machine::{ChatEvent, ChatState, TransitionError};
pub use widget::{user_facing_message, ChatWidget, SubmitError, SubmitOutcome};
