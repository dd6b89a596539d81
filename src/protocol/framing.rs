//! Line accumulator for the ASCII command protocol
//!
//! Accumulates bytes until a line terminator (CR or LF) is received.

use crate::config::protocol::{CR, LF, MAX_LINE_LEN};
use heapless::Vec;

/// A complete command line, terminator excluded.
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Accumulates incoming bytes and extracts complete command lines.
///
/// Lines are delimited by CR or LF. Lines may arrive split across any
/// number of USB packets; the partial line persists between pushes.
/// Bytes that arrive once the buffer is full are dropped, so an overlong
/// line is eventually flushed truncated.
pub struct LineAccumulator {
    buffer: Line,
    dropped: usize,
}

impl LineAccumulator {
    /// Create a new empty line accumulator.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            dropped: 0,
        }
    }

    /// Push a byte into the accumulator.
    ///
    /// Returns `Some(line)` when a terminator completes a non-empty line.
    /// Returns `None` if more bytes are needed or if the line was empty.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        if byte == CR || byte == LF {
            if self.buffer.is_empty() {
                // Bare terminator or CR after LF
                return None;
            }

            if self.dropped > 0 {
                log::warn!("Line overflow, dropped {} bytes", self.dropped);
                self.dropped = 0;
            }

            let line = core::mem::replace(&mut self.buffer, Vec::new());
            return Some(line);
        }

        if self.buffer.push(byte).is_err() {
            self.dropped += 1;
        }

        None
    }

    /// Reset the accumulator, discarding any partial line.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.dropped = 0;
    }

    /// Returns true if no partial line is in progress.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the current number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
