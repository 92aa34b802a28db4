//! Newline framing for the commit FIFO
//!
//! Bytes are accumulated across non-blocking reads and split into lines.
//! A record may arrive in any number of pieces; framing does not depend on
//! where the reads happened to break.

use std::io::{self, Read};

use tracing::warn;

use super::protocol::LINE_END;

/// Size of a single read from the commit FIFO
pub const READ_CHUNK: usize = 4096;

/// Why a drain pass stopped reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStop {
    /// Zero-length read; nothing available right now
    NoData,
    /// The descriptor would block
    WouldBlock,
    /// Any other read error, already logged
    Error,
}

/// Accumulates partial records until a full line is available
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes to the pending buffer
    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Read everything currently available from `reader`
    pub fn drain<R: Read>(&mut self, reader: &mut R) -> DrainStop {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => return DrainStop::NoData,
                Ok(n) => self.push(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return DrainStop::WouldBlock,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "read commit FIFO failed");
                    return DrainStop::Error;
                }
            }
        }
    }

    /// Remove and return the next complete line, if any
    ///
    /// The newline is consumed and a single trailing `\r` is stripped.
    /// Invalid UTF-8 is replaced rather than dropped.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|&b| b == LINE_END)?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(match String::from_utf8(line) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Bytes received that do not yet form a complete line
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}
