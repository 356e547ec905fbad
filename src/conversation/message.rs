//! Transcript entries

use crate::llm::MessageRole;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    /// Lightweight markup text; opaque to the core
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), role, content)
    }

    pub(crate) fn with_id(
        id: impl Into<String>,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
