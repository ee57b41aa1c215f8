//! Streaming reply framer
//!
//! CAT replies arrive as an undelimited byte stream; the only structure is
//! the `;` terminator. The framer accumulates bytes and hands back one
//! complete frame at a time, terminator stripped.

use tracing::debug;

use crate::MAX_FRAME_LEN;

/// Accumulates serial bytes and splits out `;`-terminated frames
#[derive(Debug, Default)]
pub struct ReplyFramer {
    buffer: Vec<u8>,
}

impl ReplyFramer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed received bytes into the framer
    pub fn push_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);

        // A run longer than any real frame with no terminator in sight is
        // line noise or a baud mismatch; drop it rather than let it grow.
        if self.buffer.len() > MAX_FRAME_LEN && !self.buffer.contains(&b';') {
            debug!(
                "discarding {} unterminated bytes from reply buffer",
                self.buffer.len()
            );
            self.buffer.clear();
        }
    }

    /// Take the next complete frame, terminator stripped and whitespace
    /// trimmed; `None` until a full frame has arrived
    pub fn next_reply(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|&b| b == b';')?;
        let frame_bytes: Vec<u8> = self.buffer.drain(..=pos).collect();
        let frame = String::from_utf8_lossy(&frame_bytes[..frame_bytes.len() - 1]);
        Some(frame.trim().to_string())
    }

    /// Throw away everything buffered; used when draining stale input
    /// before a fresh query
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of buffered bytes not yet framed
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
