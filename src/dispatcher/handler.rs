//! Command dispatcher
//!
//! Executes parsed commands against Device Control and returns the
//! response for queries.

use crate::commands::types::{Command, Response, Signal};
use crate::device::{DeviceControl, SignalBank};

/// Command dispatcher
///
/// Set commands are applied immediately and produce no response. Queries
/// read the device fresh on every call.
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Create a new command dispatcher
    pub fn new() -> Self {
        Self
    }

    /// Dispatch a command and return the response, if the command has one
    pub fn dispatch<S: SignalBank>(
        &self,
        device: &mut DeviceControl<S>,
        command: Command,
    ) -> Option<Response> {
        match command {
            Command::Status => Some(Response::Status(device.status())),
            Command::Fault => Some(self.handle_fault(device)),
            Command::Query(signal) => Some(Response::Level(self.read_signal(device, signal))),
            Command::Set(signal, level) => {
                self.write_signal(device, signal, level);
                None
            }
        }
    }

    fn handle_fault<S: SignalBank>(&self, device: &mut DeviceControl<S>) -> Response {
        Response::Fault {
            fault0: device.fault0(),
            fault1: device.fault1(),
        }
    }

    fn read_signal<S: SignalBank>(&self, device: &mut DeviceControl<S>, signal: Signal) -> bool {
        match signal {
            Signal::MuxSelect => device.mux_sel(),
            Signal::MuxOutputEnable => device.mux_output_enabled(),
            Signal::Channel0 => device.channel0_enabled(),
            Signal::Channel1 => device.channel1_enabled(),
        }
    }

    fn write_signal<S: SignalBank>(
        &self,
        device: &mut DeviceControl<S>,
        signal: Signal,
        level: bool,
    ) {
        match signal {
            Signal::MuxSelect => device.set_mux_sel(level),
            Signal::MuxOutputEnable => device.set_mux_output_enabled(level),
            Signal::Channel0 => device.set_channel0_enabled(level),
            Signal::Channel1 => device.set_channel1_enabled(level),
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
