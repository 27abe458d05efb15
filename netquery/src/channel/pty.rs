//! Interactive PTY shell channel.

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result};

/// A PTY shell channel that reads until a prompt pattern appears.
pub struct PtyChannel {
    channel: Channel<Msg>,
    buffer: PatternBuffer,
}

impl PtyChannel {
    pub(crate) fn new(channel: Channel<Msg>, search_depth: usize) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(search_depth),
        }
    }

    /// Write a line of input (a newline is appended).
    pub async fn write_line(&mut self, input: &str) -> Result<()> {
        trace!("write: {:?}", input);
        let line = format!("{input}\n");
        self.channel
            .data(line.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until `pattern` matches the tail of the accumulated output.
    ///
    /// Returns everything read up to and including the match and clears the
    /// buffer for the next read.
    pub async fn read_until(&mut self, pattern: &Regex, timeout: Duration) -> Result<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + timeout;

        while !self.buffer.tail_contains(pattern) {
            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| ChannelError::PatternTimeout(timeout))?;

            match msg {
                Some(ChannelMsg::Data { ref data }) => self.buffer.extend(data),
                Some(ChannelMsg::ExtendedData { ref data, .. }) => self.buffer.extend(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(ChannelError::Closed.into());
                }
                Some(_) => {}
            }
        }

        let data = self.buffer.take();
        trace!("read {} bytes", data.len());
        Ok(data)
    }

    /// Signal EOF and close the channel.
    pub async fn close(self) -> Result<()> {
        self.channel.eof().await.map_err(ChannelError::Ssh)?;
        self.channel.close().await.map_err(ChannelError::Ssh)?;
        Ok(())
    }
}
