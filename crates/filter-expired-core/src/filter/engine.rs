//! Filter engine
//!
//! Drives one filter process: handshake, then one event at a time until the
//! input closes. Each event is answered before the next line is read.

use super::dispatch::DispatchTable;
use super::error::ProtocolError;
use super::handshake;
use super::output::{OutputSink, OutputTask};
use super::parser::FilterEvent;
use super::reader::LineReader;
use super::response;
use filter_expired_common::ProtocolVersion;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info};

/// smtpd filter protocol engine
pub struct FilterEngine {
    table: DispatchTable,
}

impl FilterEngine {
    pub fn new(table: DispatchTable) -> Self {
        Self { table }
    }

    /// Run the protocol until the input ends.
    ///
    /// `Ok(())` on end of input, at any point. Any protocol violation is
    /// returned as an error after output already queued has been flushed.
    pub async fn run<R, W>(&self, input: R, output: W) -> Result<(), ProtocolError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut reader = LineReader::new(input);

        if !handshake::skip_config(&mut reader).await? {
            info!("Input closed before configuration completed");
            return Ok(());
        }

        let (sink, task) = OutputTask::spawn(output);
        let served = self.serve(&mut reader, &sink).await;

        drop(sink);
        let flushed = task.finish().await;

        served?;
        flushed
    }

    async fn serve<R>(
        &self,
        reader: &mut LineReader<R>,
        sink: &OutputSink,
    ) -> Result<(), ProtocolError>
    where
        R: AsyncBufRead + Unpin,
    {
        handshake::register(&self.table, sink).await?;
        info!(
            phases = ?self.table.phases().map(|p| p.as_str()).collect::<Vec<_>>(),
            "Filter registered"
        );

        let mut negotiated: Option<ProtocolVersion> = None;

        while let Some(line) = reader.next_line().await? {
            let event = FilterEvent::parse(&line)?;

            if negotiated.as_ref() != Some(&event.version) {
                debug!(version = %event.version, "Peer protocol version");
                negotiated = Some(event.version.clone());
            }

            let (context, verdict) = self.table.dispatch(&event, &line).await?;
            debug!(
                session = %context.session_id,
                phase = event.phase,
                verdict = %verdict,
                "Decision"
            );

            sink.send(response::filter_result(&context, &verdict, &event.version))
                .await?;
        }

        info!(lines = reader.line_number(), "Input closed");
        Ok(())
    }
}
