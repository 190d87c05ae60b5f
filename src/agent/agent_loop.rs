//! Main chat loop — pumps channel messages through the chat session.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;

use crate::agent::submission::{HELP_TEXT, Submission, SubmissionParser};
use crate::channels::{Channel, IncomingMessage, OutgoingResponse, StatusUpdate};
use crate::chat::{ChatSession, Speaker};
use crate::error::{ChatError, Error};

/// Stops a running [`Agent`], even while it is waiting on Wingman.
#[derive(Clone)]
pub struct ShutdownHandle(Arc<watch::Sender<bool>>);

impl ShutdownHandle {
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

/// The chat agent: one channel in front of one chat session.
pub struct Agent {
    session: Arc<ChatSession>,
    channel: Box<dyn Channel>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl Agent {
    /// Create a new agent.
    pub fn new(session: Arc<ChatSession>, channel: Box<dyn Channel>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            session,
            channel,
            shutdown: Arc::new(shutdown),
        }
    }

    /// Handle for stopping the agent from elsewhere.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }

    /// Run until the channel closes, `/quit` arrives, Ctrl+C, or a
    /// [`ShutdownHandle`] fires.
    pub async fn run(self) -> Result<(), Error> {
        let mut message_stream = self.channel.start().await?;
        let mut shutdown = self.shutdown.subscribe();

        let ctrl_c = {
            let handle = self.shutdown_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Ctrl+C received, shutting down...");
                    handle.trigger();
                }
            })
        };

        tracing::info!(channel = self.channel.name(), "Wingman ready and listening");

        loop {
            let message = tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => break,
                msg = message_stream.next() => {
                    match msg {
                        Some(m) => m,
                        None => {
                            tracing::info!("Channel stream ended, shutting down...");
                            break;
                        }
                    }
                }
            };

            // Dropping an unfinished submit leaves the session idle and its
            // transcript untouched.
            let handled = tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => {
                    tracing::info!("Shutdown while waiting on Wingman, reply abandoned");
                    break;
                }
                result = self.handle_message(&message) => result,
            };

            match handled {
                Ok(Some(response)) if !response.is_empty() => {
                    if let Err(e) = self
                        .channel
                        .respond(&message, OutgoingResponse::text(response))
                        .await
                    {
                        tracing::warn!(error = %e, "Failed to deliver reply");
                    }
                }
                Ok(Some(_)) => {}
                Ok(None) => {
                    tracing::info!("Shutdown command received, exiting...");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Message not sent to Wingman");
                    let notice = match e {
                        Error::Chat(chat) => chat.to_string(),
                        other => format!("Error: {}", other),
                    };
                    let _ = self
                        .channel
                        .send_status(StatusUpdate::Status(notice))
                        .await;
                }
            }
        }

        ctrl_c.abort();
        Ok(())
    }

    /// Handle one message. `Ok(None)` means shut down.
    async fn handle_message(&self, message: &IncomingMessage) -> Result<Option<String>, Error> {
        tracing::debug!(
            "Received message from {} on {} ({} chars)",
            message.user_id,
            message.channel,
            message.content.len()
        );

        match SubmissionParser::parse(&message.content) {
            Submission::UserInput { content } => {
                if content.is_empty() {
                    return Err(ChatError::EmptyMessage.into());
                }
                let _ = self
                    .channel
                    .send_status(StatusUpdate::Thinking("Wingman is thinking...".into()))
                    .await;
                let reply = self.session.submit(&content).await?;
                Ok(Some(reply.text))
            }
            Submission::History => Ok(Some(self.render_history().await)),
            Submission::Clear => {
                self.session.clear().await;
                Ok(Some("Conversation cleared.".to_string()))
            }
            Submission::Help => Ok(Some(HELP_TEXT.to_string())),
            Submission::Quit => Ok(None),
        }
    }

    async fn render_history(&self) -> String {
        let transcript = self.session.transcript().await;
        if transcript.is_empty() {
            return "No messages yet.".to_string();
        }
        transcript
            .iter()
            .map(|entry| {
                let who = match entry.speaker {
                    Speaker::User => "You",
                    Speaker::Wingman => "Wingman",
                };
                format!("[{}] {}: {}", entry.sent_at.format("%H:%M"), who, entry.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
