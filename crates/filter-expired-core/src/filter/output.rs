//! Output serializer
//!
//! A single task owns the output stream. Everything that wants to talk to
//! smtpd goes through an [`OutputSink`], so lines land whole and in the
//! order they were queued.

use super::error::ProtocolError;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, trace};

/// Queue depth between producers and the writer task.
///
/// Kept at one so a producer waits for the writer instead of piling up
/// responses.
const QUEUE_DEPTH: usize = 1;

/// Producer handle onto the output stream
#[derive(Clone)]
pub struct OutputSink {
    tx: mpsc::Sender<String>,
}

impl OutputSink {
    /// Queue one line; the terminator is added by the writer
    pub async fn send(&self, line: String) -> Result<(), ProtocolError> {
        self.tx
            .send(line)
            .await
            .map_err(|_| ProtocolError::OutputClosed)
    }
}

/// The writer task owning the output stream
pub struct OutputTask {
    handle: JoinHandle<std::io::Result<()>>,
}

impl OutputTask {
    /// Start the writer task on `output`
    pub fn spawn<W>(output: W) -> (OutputSink, OutputTask)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let handle = tokio::spawn(write_lines(rx, output));
        (OutputSink { tx }, OutputTask { handle })
    }

    /// Wait until every queued line is written.
    ///
    /// Returns once all sinks are dropped and the queue is drained.
    pub async fn finish(self) -> Result<(), ProtocolError> {
        match self.handle.await {
            Ok(result) => result.map_err(ProtocolError::from),
            Err(e) => Err(ProtocolError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("output task failed: {}", e),
            ))),
        }
    }
}

async fn write_lines<W>(mut rx: mpsc::Receiver<String>, mut output: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        trace!(line = %line, "Writing response");

        let mut record = line.into_bytes();
        record.push(b'\n');

        if let Err(e) = write_record(&mut output, &record).await {
            error!(error = %e, "Failed to write to output stream");
            return Err(e);
        }
    }

    output.shutdown().await
}

async fn write_record<W>(output: &mut W, record: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(record).await?;
    output.flush().await
}
