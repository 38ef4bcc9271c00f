//! Line reader for the peer's input stream

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Pulls newline-delimited records off the input stream
pub struct LineReader<R> {
    lines: Lines<R>,
    line_number: u64,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            line_number: 0,
        }
    }

    /// Next record without its line terminator; `None` at end of stream
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let line = self.lines.next_line().await?;
        if line.is_some() {
            self.line_number += 1;
        }
        Ok(line)
    }

    /// Number of records read so far
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}
