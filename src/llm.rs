//! Upstream chat provider abstraction
//!
//! A [`ChatBackend`] creates [`UpstreamSession`]s. A session keeps whatever
//! multi-turn context the provider needs and turns one user message into a
//! [`FragmentStream`].

mod error;
mod gemini;
mod sse;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::GeminiBackend;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Factory for upstream sessions
pub trait ChatBackend: Send + Sync {
    /// Create a fresh session with no prior turns.
    ///
    /// Credentials are checked here, not when the backend is built.
    fn create_session(&self, options: &SessionOptions)
        -> Result<Box<dyn UpstreamSession>, LlmError>;

    /// Model identifier used for logging
    fn model_id(&self) -> &str;
}

/// Opaque multi-turn context owned by a streaming session
#[async_trait]
pub trait UpstreamSession: Send {
    /// Send one user message and return its reply as ordered fragments.
    ///
    /// Errors that happen before any fragment is produced (transport,
    /// status) are returned here; later ones arrive inside the stream.
    async fn send_message_stream(&mut self, text: &str) -> Result<FragmentStream, LlmError>;
}

impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    fn create_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn UpstreamSession>, LlmError> {
        (**self).create_session(options)
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
