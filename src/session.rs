//! Streaming session client
//!
//! Owns at most one upstream session handle, created lazily on the first
//! [`StreamingSession::send`] and reused until [`StreamingSession::reset`].
//! Errors from the upstream are logged and passed through untouched; there
//! is no retry here.

use crate::llm::{ChatBackend, LlmError, SessionOptions, UpstreamSession};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;

pub struct StreamingSession {
    backend: Arc<dyn ChatBackend>,
    options: SessionOptions,
    handle: Option<Box<dyn UpstreamSession>>,
}

impl StreamingSession {
    pub fn new(backend: Arc<dyn ChatBackend>, options: SessionOptions) -> Self {
        Self {
            backend,
            options,
            handle: None,
        }
    }

    /// Whether an upstream session currently exists
    pub fn has_upstream_session(&self) -> bool {
        self.handle.is_some()
    }

    /// Send `text` and stream the reply.
    ///
    /// `on_delta` receives the cumulative reply after every non-empty
    /// fragment, in arrival order, and can be displayed as-is. Resolves with
    /// the full reply once the upstream stream is exhausted.
    pub async fn send<F>(&mut self, text: &str, mut on_delta: F) -> Result<String, LlmError>
    where
        F: FnMut(&str),
    {
        if text.trim().is_empty() {
            return Err(LlmError::invalid_request("Message text is empty"));
        }

        let start = Instant::now();
        let mut fragments = 0usize;
        let result = self.stream_reply(text, &mut on_delta, &mut fragments).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.backend.model_id(),
                    duration_ms = %duration.as_millis(),
                    fragments,
                    reply_chars = reply.chars().count(),
                    "Chat reply completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.backend.model_id(),
                    duration_ms = %duration.as_millis(),
                    fragments,
                    kind = %e.kind,
                    status = ?e.status,
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Chat reply failed"
                );
            }
        }

        result
    }

    /// Discard the upstream session so the next send starts without memory
    /// of earlier turns. Safe to call when no session exists.
    pub fn reset(&mut self) {
        if self.handle.take().is_some() {
            tracing::info!(model = %self.backend.model_id(), "Upstream chat session discarded");
        }
    }

    async fn stream_reply<F>(
        &mut self,
        text: &str,
        on_delta: &mut F,
        fragments: &mut usize,
    ) -> Result<String, LlmError>
    where
        F: FnMut(&str),
    {
        let session = self.upstream()?;
        let mut stream = session.send_message_stream(text).await?;

        let mut reply = String::new();
        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            if fragment.is_empty() {
                continue;
            }
            *fragments += 1;
            reply.push_str(&fragment);
            on_delta(&reply);
        }

        Ok(reply)
    }

    fn upstream(&mut self) -> Result<&mut Box<dyn UpstreamSession>, LlmError> {
        let session = match self.handle.take() {
            Some(session) => session,
            None => {
                let session = self.backend.create_session(&self.options)?;
                tracing::info!(
                    model = %self.backend.model_id(),
                    temperature = self.options.temperature,
                    "Upstream chat session created"
                );
                session
            }
        };
        Ok(self.handle.insert(session))
    }
}
