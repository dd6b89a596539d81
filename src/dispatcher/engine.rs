//! Command engine
//!
//! Turns the inbound byte stream into framed lines, parses and dispatches
//! them, and writes query responses back to any `embedded_io::Write` sink
//! (the serial channel on the device).

use crate::commands::{CommandParser, ParseError, ResponseSerialiser};
use crate::config::protocol::LINE_ENDING;
use crate::device::{DeviceControl, SignalBank};
use crate::dispatcher::handler::CommandDispatcher;
use crate::protocol::LineAccumulator;
use embedded_io::Write;

/// Byte-at-a-time command engine
///
/// Rejected lines are logged and otherwise dropped; nothing is ever written
/// to the host for them.
pub struct CommandEngine {
    accumulator: LineAccumulator,
    parser: CommandParser,
    dispatcher: CommandDispatcher,
    serialiser: ResponseSerialiser,
}

impl CommandEngine {
    pub fn new() -> Self {
        Self {
            accumulator: LineAccumulator::new(),
            parser: CommandParser::new(),
            dispatcher: CommandDispatcher::new(),
            serialiser: ResponseSerialiser::new(),
        }
    }

    /// Feed one byte from the transport
    ///
    /// A terminator that completes a non-empty line dispatches it before
    /// returning.
    pub fn feed<W: Write, S: SignalBank>(
        &mut self,
        byte: u8,
        channel: &mut W,
        device: &mut DeviceControl<S>,
    ) {
        if let Some(line) = self.accumulator.push(byte) {
            self.process_line(&line, channel, device);
        }
    }

    /// Feed every byte of a received packet
    pub fn feed_all<W: Write, S: SignalBank>(
        &mut self,
        bytes: &[u8],
        channel: &mut W,
        device: &mut DeviceControl<S>,
    ) {
        for &byte in bytes {
            self.feed(byte, channel, device);
        }
    }

    /// Parse and execute one complete line (terminator excluded)
    pub fn process_line<W: Write, S: SignalBank>(
        &self,
        line: &[u8],
        channel: &mut W,
        device: &mut DeviceControl<S>,
    ) {
        let command = match self.parser.parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return,
            Err(e) => {
                log::debug!("Rejected {:?}: {:?}", Escaped(line), e);
                return;
            }
        };

        log::debug!("Command {:?}", command);

        let Some(response) = self.dispatcher.dispatch(device, command) else {
            return;
        };

        let text = self.serialiser.serialise(&response);
        let result = channel
            .write_all(text.as_bytes())
            .and_then(|()| channel.write_all(LINE_ENDING));
        if let Err(e) = result {
            log::warn!("Response dropped: {:?}", e);
        }
    }

    /// Returns true if a partial line is waiting for its terminator
    pub fn has_partial_line(&self) -> bool {
        !self.accumulator.is_empty()
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug view of a raw line with non-printable bytes escaped
struct Escaped<'a>(&'a [u8]);

impl core::fmt::Debug for Escaped<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        f.write_char('"')?;
        for &b in self.0 {
            for c in core::ascii::escape_default(b) {
                f.write_char(char::from(c))?;
            }
        }
        f.write_char('"')
    }
}
