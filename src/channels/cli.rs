//! CLI channel — stdin/stdout chat with Wingman.

use std::io::{BufRead, ErrorKind};

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedSender;

use crate::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse, StatusUpdate};
use crate::error::ChannelError;

/// A simple CLI channel that reads from stdin and writes to stdout.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward non-empty trimmed lines from `reader` until EOF, a hard I/O
/// error, or the receiver going away. Lines that are not valid UTF-8 are
/// skipped.
///
/// Blocking; runs on its own thread so a pending stdin read never holds up
/// runtime shutdown.
fn forward_lines<R: BufRead>(reader: R, tx: UnboundedSender<IncomingMessage>) {
    let mut lines = reader.lines();

    eprint!("> ");

    loop {
        match lines.next() {
            Some(Ok(line)) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    eprint!("> ");
                    continue;
                }
                let msg = IncomingMessage::new("cli", "local-user", &line);
                if tx.send(msg).is_err() {
                    break;
                }
            }
            None => break, // EOF
            Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!("Skipping stdin line that is not valid UTF-8: {}", e);
                eprint!("> ");
            }
            Some(Err(e)) => {
                tracing::error!("Error reading stdin: {}", e);
                break;
            }
        }
    }
}

/// Write one reply block to `out`.
async fn write_reply<W>(out: &mut W, content: &str) -> Result<(), ChannelError>
where
    W: AsyncWrite + Unpin,
{
    let block = format!("\n{}\n\n", content);
    let written = match out.write_all(block.as_bytes()).await {
        Ok(()) => out.flush().await,
        Err(e) => Err(e),
    };
    written.map_err(|e| ChannelError::SendFailed {
        name: "cli".to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        std::thread::spawn(move || forward_lines(std::io::stdin().lock(), tx));

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(
        &self,
        _msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        write_reply(&mut tokio::io::stdout(), &response.content).await?;
        eprint!("> ");
        Ok(())
    }

    async fn send_status(&self, status: StatusUpdate) -> Result<(), ChannelError> {
        match status {
            StatusUpdate::Thinking(msg) => eprintln!("⏳ {}", msg),
            StatusUpdate::Status(msg) => {
                eprintln!("ℹ️  {}", msg);
                eprint!("> ");
            }
        }
        Ok(())
    }
}
