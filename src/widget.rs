//! Chat widget controller
//!
//! Runs one submission end to end: append the user entry and an empty
//! reply, stream the upstream answer into the reply, then settle the
//! lifecycle. Failures become a fixed notice in the reply entry; they never
//! escape as errors and never poison the next submission.

use crate::config::ChatConfig;
use crate::conversation::{ConversationStore, Message, StoreError};
use crate::llm::{ChatBackend, GeminiBackend, LlmError, LlmErrorKind, SessionOptions};
use crate::session::StreamingSession;
use crate::state_machine::{transition, ChatEvent, ChatState, TransitionError};
use crate::system_prompt::{QuickAction, QUICK_ACTIONS};
use std::sync::Arc;
use thiserror::Error;

pub const CONFIGURATION_ERROR_NOTICE: &str =
    "⚠️ Configuration Error: API Key is missing or invalid.";
pub const NETWORK_ERROR_NOTICE: &str = "⚠️ Network Error: Please check your internet connection.";
pub const UPSTREAM_ERROR_NOTICE: &str =
    "⚠️ Service temporarily unavailable. Please try again in a moment.";
pub const GENERIC_ERROR_NOTICE: &str = "⚠️ Sorry, I'm having trouble connecting right now. Please try again later or contact us directly on WhatsApp.";

/// The notice shown in place of a reply that failed with `error`
pub fn user_facing_message(error: &LlmError) -> &'static str {
    match error.kind {
        LlmErrorKind::Configuration => CONFIGURATION_ERROR_NOTICE,
        LlmErrorKind::Network => NETWORK_ERROR_NOTICE,
        LlmErrorKind::Upstream => UPSTREAM_ERROR_NOTICE,
        LlmErrorKind::InvalidRequest | LlmErrorKind::Unknown => GENERIC_ERROR_NOTICE,
    }
}

/// How an accepted submission ended
#[derive(Debug)]
pub enum SubmitOutcome {
    Completed { reply: String },
    /// The notice for `error` is already in the transcript
    Failed { error: LlmError },
}

/// A submission that was refused before anything was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] StoreError),
    #[error("Unknown quick action #{0}")]
    UnknownQuickAction(usize),
}

pub struct ChatWidget {
    store: ConversationStore,
    session: StreamingSession,
    open: bool,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>, options: SessionOptions) -> Self {
        Self {
            store: ConversationStore::new(),
            session: StreamingSession::new(backend, options),
            open: false,
        }
    }

    /// Widget backed by Gemini. A missing key is only reported on first send.
    pub fn from_config(config: ChatConfig) -> Result<Self, LlmError> {
        let options = config.session_options();
        let backend = GeminiBackend::new(config)?;
        Ok(Self::new(Arc::new(backend), options))
    }

    pub fn transcript(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn state(&self) -> ChatState {
        self.store.lifecycle()
    }

    #[allow(clippy::unused_self)]
    pub fn quick_actions(&self) -> &'static [QuickAction] {
        QUICK_ACTIONS
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Submit `text` and stream the reply into the transcript.
    ///
    /// Refused (no transcript change, nothing sent) for blank text or while
    /// a reply is in progress.
    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome, SubmitError> {
        let Self { store, session, .. } = self;

        let user_id = store.append_user_message(text)?;
        advance(store, ChatEvent::Submit);
        let reply_id = store.append_placeholder_response();
        tracing::debug!(%user_id, %reply_id, "Chat message submitted");

        let mut reply = PendingReply {
            store,
            reply_id,
            settled: false,
        };
        let result = session.send(text, |partial| reply.stream(partial)).await;

        match result {
            Ok(full) => {
                reply.complete();
                Ok(SubmitOutcome::Completed { reply: full })
            }
            Err(error) => {
                reply.fail(user_facing_message(&error));
                tracing::warn!(
                    kind = %error.kind,
                    status = ?error.status,
                    "Chat reply replaced with error notice"
                );
                Ok(SubmitOutcome::Failed { error })
            }
        }
    }

    /// Submit the query of the quick action at `index`
    pub async fn submit_quick_action(
        &mut self,
        index: usize,
    ) -> Result<SubmitOutcome, SubmitError> {
        let action = QUICK_ACTIONS
            .get(index)
            .ok_or(SubmitError::UnknownQuickAction(index))?;
        tracing::debug!(label = action.label, "Quick action selected");
        self.submit(action.query).await
    }

    /// Start over: transcript back to the welcome entry, upstream memory
    /// dropped. Refused while a reply is in progress.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        let next = transition(self.store.lifecycle(), ChatEvent::Reset)?;
        self.store.reset();
        self.session.reset();
        self.store.set_lifecycle(next);
        tracing::info!("Chat reset");
        Ok(())
    }
}

/// The reply entry of a submission in flight.
///
/// If the submission is dropped before it settles (a caller timeout, a
/// losing `select!` branch) the reply gets the generic notice and the
/// lifecycle moves to error, so the widget accepts input again.
struct PendingReply<'a> {
    store: &'a mut ConversationStore,
    reply_id: String,
    settled: bool,
}

impl PendingReply<'_> {
    fn stream(&mut self, partial: &str) {
        advance(self.store, ChatEvent::Delta);
        self.store.update_message_content(&self.reply_id, partial);
    }

    fn complete(&mut self) {
        self.settled = true;
        advance(self.store, ChatEvent::Completed);
    }

    fn fail(&mut self, notice: &str) {
        self.settled = true;
        self.store.update_message_content(&self.reply_id, notice);
        advance(self.store, ChatEvent::Failed);
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(reply_id = %self.reply_id, "Chat reply abandoned before it finished");
            self.fail(GENERIC_ERROR_NOTICE);
        }
    }
}

/// Apply `event` to the store's lifecycle. Rejected events are logged and
/// leave the state as it was.
fn advance(store: &mut ConversationStore, event: ChatEvent) {
    let current = store.lifecycle();
    match transition(current, event) {
        Ok(next) => {
            if next != current {
                tracing::debug!(from = %current, to = %next, %event, "Chat state changed");
            }
            store.set_lifecycle(next);
        }
        Err(e) => tracing::warn!(error = %e, "Ignored chat state event"),
    }
}
