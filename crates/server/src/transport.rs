//! Line-delimited JSON transport over stdin and stdout.
//!
//! Each input line is one [`IncomingMessage`]; each output line is one
//! [`OutgoingMessage`]. Malformed lines are logged and skipped.

use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use runtime::{IncomingMessage, OutgoingMessage, RuntimeHandle};

/// Feeds stdin lines to the coordinator until EOF.
pub async fn read_stdin(handle: RuntimeHandle) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<IncomingMessage>(line) {
            Ok(message) => handle.send(message)?,
            Err(error) => warn!(target: "server::transport", %error, "malformed message skipped"),
        }
    }
    debug!(target: "server::transport", "stdin closed");
    Ok(())
}

/// Writes every outgoing message to stdout as it is published.
pub async fn write_stdout(mut outgoing: broadcast::Receiver<OutgoingMessage>) -> Result<()> {
    let mut stdout = io::stdout();
    loop {
        match outgoing.recv().await {
            Ok(message) => {
                let mut line = serde_json::to_vec(&message)?;
                line.push(b'\n');
                stdout.write_all(&line).await?;
                stdout.flush().await?;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "server::transport", skipped, "stdout fell behind; messages dropped");
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
}
