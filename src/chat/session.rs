//! Chat session — the caller side of the Wingman relay.
//!
//! The relay keeps no memory and does not order requests, so the session
//! owns the transcript and refuses new input while a reply is outstanding.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ChatError;
use crate::wingman::WingmanRelay;

use super::model::ChatEntry;

/// Clears the in-flight flag when dropped, including when the submit future
/// is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single chat conversation with Wingman.
pub struct ChatSession {
    relay: Arc<WingmanRelay>,
    transcript: Mutex<Vec<ChatEntry>>,
    in_flight: AtomicBool,
}

impl ChatSession {
    /// Create an empty session.
    pub fn new(relay: Arc<WingmanRelay>) -> Self {
        Self {
            relay,
            transcript: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit a user message and wait for Wingman's reply.
    ///
    /// Blank input is rejected before reaching the relay. Only one message
    /// may be outstanding at a time; a second submit during that window
    /// returns `ChatError::Busy` and leaves the transcript untouched.
    pub async fn submit(&self, text: &str) -> Result<ChatEntry, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let _in_flight = InFlight::acquire(&self.in_flight).ok_or(ChatError::Busy)?;

        let question = ChatEntry::user(text);
        let history = self.history().await;

        debug!(history_len = history.len(), "Submitting chat message to Wingman");
        let reply = self.relay.ask(text, &history).await;

        // Both entries land together; a cancelled submit leaves no trace.
        let entry = ChatEntry::wingman(reply);
        let mut transcript = self.transcript.lock().await;
        transcript.push(question);
        transcript.push(entry.clone());
        Ok(entry)
    }

    /// Whether a reply is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the full transcript, oldest first.
    pub async fn transcript(&self) -> Vec<ChatEntry> {
        self.transcript.lock().await.clone()
    }

    /// Transcript texts in order, as passed to the relay.
    pub async fn history(&self) -> Vec<String> {
        self.transcript
            .lock()
            .await
            .iter()
            .map(|e| e.text.clone())
            .collect()
    }

    /// Drop all transcript entries.
    pub async fn clear(&self) {
        let mut transcript = self.transcript.lock().await;
        info!(entries = transcript.len(), "Clearing chat transcript");
        transcript.clear();
    }
}
