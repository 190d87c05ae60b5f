//! Chat transcript model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Wingman,
}

/// A single line in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Unique ID.
    pub id: Uuid,
    /// Author of the entry.
    pub speaker: Speaker,
    /// Message text as displayed.
    pub text: String,
    /// When the entry was recorded.
    pub sent_at: DateTime<Utc>,
}

impl ChatEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn wingman(text: impl Into<String>) -> Self {
        Self::new(Speaker::Wingman, text)
    }
}
