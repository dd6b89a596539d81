//! Command and response types for the line protocol
//!
//! # Protocol Format
//!
//! Commands are case-sensitive ASCII lines terminated by CR and/or LF:
//! ```text
//! <CMD>?          query, answered with one response line
//! <CMD> <0|1>     set, never answered
//! ```
//!
//! Every response line is terminated with CRLF. Malformed or unknown lines
//! produce no response and no state change.

use crate::device::DeviceStatus;

/// Controllable signals addressable by name on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Mux path select (`SEL`)
    MuxSelect,
    /// Mux output enable, logical sense (`OE`)
    MuxOutputEnable,
    /// VBUS channel 0 enable (`EN0`)
    Channel0,
    /// VBUS channel 1 enable (`EN1`)
    Channel1,
}

impl Signal {
    /// All signals in wire table order
    pub const ALL: [Signal; 4] = [
        Signal::MuxSelect,
        Signal::MuxOutputEnable,
        Signal::Channel0,
        Signal::Channel1,
    ];

    /// Command keyword for this signal
    pub fn keyword(self) -> &'static str {
        match self {
            Signal::MuxSelect => "SEL",
            Signal::MuxOutputEnable => "OE",
            Signal::Channel0 => "EN0",
            Signal::Channel1 => "EN1",
        }
    }
}

/// Parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `STATUS?`
    Status,

    /// `FAULT?`
    Fault,

    /// `SEL?`, `OE?`, `EN0?`, `EN1?`
    Query(Signal),

    /// `SEL 0|1`, `OE 0|1`, `EN0 0|1`, `EN1 0|1`
    Set(Signal, bool),
}

impl Command {
    /// Returns true if the command produces a response line
    pub fn expects_response(&self) -> bool {
        !matches!(self, Command::Set(..))
    }
}

/// Reasons a line is rejected
///
/// Rejections are never reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing left after trimming
    Empty,

    /// Line matches no table entry
    UnknownCommand,

    /// Set command whose argument is not a lone `0` or `1`
    InvalidArgument,
}

/// Response to a query command
///
/// | Command   | Response                                          |
/// |-----------|---------------------------------------------------|
/// | `STATUS?` | `SEL=<b> OE=<b> EN0=<b> EN1=<b> F0=<b> F1=<b>`    |
/// | `FAULT?`  | `<f0> <f1>`                                       |
/// | `<SIG>?`  | `0` or `1`                                        |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Full device snapshot
    Status(DeviceStatus),

    /// Fault flags for channel 0 and channel 1
    Fault { fault0: bool, fault1: bool },

    /// Single logical signal level
    Level(bool),
}
