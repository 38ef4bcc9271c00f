//! Startup handshake
//!
//! smtpd first streams its configuration, ending with `config|ready`. The
//! filter then registers the phases it handles and declares itself ready.

use super::dispatch::DispatchTable;
use super::error::ProtocolError;
use super::output::OutputSink;
use super::reader::LineReader;
use tokio::io::AsyncBufRead;
use tracing::{debug, trace};

/// Marker closing the configuration block
pub const CONFIG_READY: &str = "config|ready";

/// Marker closing the registration block
pub const REGISTER_READY: &str = "register|ready";

/// Discard configuration lines up to `config|ready`.
///
/// Returns `false` if the input ended before the marker.
pub async fn skip_config<R>(reader: &mut LineReader<R>) -> Result<bool, ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    while let Some(line) = reader.next_line().await? {
        if line == CONFIG_READY {
            debug!(lines = reader.line_number(), "Configuration complete");
            return Ok(true);
        }
        trace!(line = %line, "Skipping configuration line");
    }
    Ok(false)
}

/// Registration block for a dispatch table, `register|ready` last
pub fn registration_lines(table: &DispatchTable) -> Vec<String> {
    table
        .phases()
        .map(|phase| format!("register|filter|smtp-in|{}", phase))
        .chain(std::iter::once(REGISTER_READY.to_string()))
        .collect()
}

/// Emit the registration block
pub async fn register(table: &DispatchTable, sink: &OutputSink) -> Result<(), ProtocolError> {
    for line in registration_lines(table) {
        sink.send(line).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::testing::StaticExpiryRepository;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_skip_config_stops_at_marker() {
        let input = b"config|smtpd-version|6.6.1\nconfig|smtp-session-timeout|300\nconfig|ready\nfilter|next\n";
        let mut reader = LineReader::new(&input[..]);

        assert!(skip_config(&mut reader).await.unwrap());
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("filter|next"));
    }

    #[tokio::test]
    async fn test_skip_config_end_of_input() {
        let mut reader = LineReader::new(&b"config|smtpd-version|6.6.1\n"[..]);
        assert!(!skip_config(&mut reader).await.unwrap());
    }

    #[tokio::test]
    async fn test_marker_must_match_exactly() {
        let mut reader = LineReader::new(&b"config|ready|now\n config|ready\n"[..]);
        assert!(!skip_config(&mut reader).await.unwrap());
    }

    #[test]
    fn test_registration_lines() {
        let table = DispatchTable::expiry_checks(Arc::new(StaticExpiryRepository::new()));
        assert_eq!(
            registration_lines(&table),
            vec![
                "register|filter|smtp-in|mail-from".to_string(),
                "register|filter|smtp-in|rcpt-to".to_string(),
                "register|ready".to_string(),
            ]
        );
    }
}
