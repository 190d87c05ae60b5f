//! Channel trait and the message types that flow through it.

use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::Stream;
use uuid::Uuid;

use crate::error::ChannelError;

/// A message received from a channel.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Unique ID.
    pub id: Uuid,
    /// Name of the channel it arrived on.
    pub channel: String,
    /// Channel-specific user identifier.
    pub user_id: String,
    /// Message text.
    pub content: String,
    /// When the message was received.
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            user_id: user_id.into(),
            content: content.into(),
            received_at: Utc::now(),
        }
    }
}

/// A reply sent back on a channel.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    pub content: String,
}

impl OutgoingResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Progress notifications shown while a reply is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Wingman is working on a reply.
    Thinking(String),
    /// Informational line.
    Status(String),
}

/// Stream of incoming messages from a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A source of user messages and a sink for replies.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name, used in logs and on incoming messages.
    fn name(&self) -> &str;

    /// Begin receiving messages.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Deliver a reply to the message it answers.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    /// Show a progress update.
    async fn send_status(&self, status: StatusUpdate) -> Result<(), ChannelError>;
}
