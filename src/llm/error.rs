//! Upstream error types

use thiserror::Error;

/// Upstream error with classification
///
/// Errors are tagged with their kind where they happen (credential check,
/// transport call, service response), so callers never need to inspect
/// the message text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    /// HTTP or in-stream status code reported by the upstream, if any
    pub status: Option<u16>,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Configuration, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Network, message)
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Upstream,
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Unknown, message)
    }

    /// Classify a non-success HTTP status from the upstream.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::configuration(message).with_status(status),
            _ => Self::upstream(Some(status), message),
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Missing or rejected credential - needs operator action
    Configuration,
    /// Endpoint unreachable, timeouts, broken body - transient
    Network,
    /// Service-level failure reported by the upstream (e.g. 503) - transient
    Upstream,
    /// The caller broke a precondition of the client (e.g. empty text)
    InvalidRequest,
    /// Anything else
    Unknown,
}

impl LlmErrorKind {
    /// Whether a later attempt could succeed without operator action.
    ///
    /// Informational only; nothing in this crate retries.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Upstream)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Network => "network",
            Self::Upstream => "upstream",
            Self::InvalidRequest => "invalid_request",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
