//! Line-delimited JSON message writer

use super::Message;
use crate::error::Result;
use std::io::Write;

/// Writes one message per line and flushes after each
#[derive(Debug)]
pub struct MessageWriter<W: Write> {
    out: W,
    written: usize,
}

impl MessageWriter<std::io::Stdout> {
    /// Writer over stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> MessageWriter<W> {
    /// Wrap a sink
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Write a message followed by a newline
    pub fn write(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Write every message in order
    pub fn write_all<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) -> Result<()> {
        for message in messages {
            self.write(message)?;
        }
        Ok(())
    }

    /// Number of messages written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
