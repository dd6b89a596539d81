//! Response serialiser
//!
//! Renders Response values into the ASCII response line (without CRLF).

use crate::commands::types::Response;
use crate::config::protocol::MAX_RESPONSE_LEN;
use core::fmt::Write;
use heapless::String;

/// Rendered response line
pub type ResponseLine = String<MAX_RESPONSE_LEN>;

/// Serialiser for response lines
pub struct ResponseSerialiser;

impl ResponseSerialiser {
    /// Create a new response serialiser
    pub fn new() -> Self {
        Self
    }

    /// Serialise a response to its text form
    ///
    /// The longest line (`STATUS?`) is 32 characters, well inside
    /// `MAX_RESPONSE_LEN`, so formatting cannot fail.
    pub fn serialise(&self, response: &Response) -> ResponseLine {
        let mut line = ResponseLine::new();

        let _ = match response {
            Response::Status(status) => write!(
                line,
                "SEL={} OE={} EN0={} EN1={} F0={} F1={}",
                digit(status.mux_sel),
                digit(status.mux_output_enabled),
                digit(status.channel0_enabled),
                digit(status.channel1_enabled),
                digit(status.fault0),
                digit(status.fault1),
            ),
            Response::Fault { fault0, fault1 } => {
                write!(line, "{} {}", digit(*fault0), digit(*fault1))
            }
            Response::Level(level) => write!(line, "{}", digit(*level)),
        };

        line
    }
}

impl Default for ResponseSerialiser {
    fn default() -> Self {
        Self::new()
    }
}

fn digit(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}
