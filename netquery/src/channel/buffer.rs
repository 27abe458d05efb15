//! Output buffer with tail-only prompt search.
//!
//! Long show commands (`show running-config`, `show ip route` on a core
//! router) produce megabytes of text; the prompt can only ever be at the
//! end, so only the last `search_depth` bytes are scanned.

use regex::bytes::{Match, Regex};

/// Default number of trailing bytes scanned for a prompt.
pub const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Accumulates channel output and searches its tail for patterns.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a buffer that scans the last `search_depth` bytes.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append raw channel data, dropping ANSI escape sequences.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Find `pattern` within the tail window.
    ///
    /// Offsets in the returned match are relative to the window, not the
    /// whole buffer.
    pub fn search_tail(&self, pattern: &Regex) -> Option<Match<'_>> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.find(&self.buffer[start..])
    }

    /// Whether the tail window contains `pattern`.
    pub fn tail_contains(&self, pattern: &Regex) -> bool {
        self.search_tail(pattern).is_some()
    }

    /// Take the accumulated bytes, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn search_depth(&self) -> usize {
        self.search_depth
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}
