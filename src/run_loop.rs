//! Cooperative run loop
//!
//! One logical thread: poll the USB stack, drain at most one packet, feed
//! it to the command engine. Responses are written inline from the same
//! iteration.

use crate::config::usb::BULK_MAX_PACKET;
use crate::device::{DeviceControl, SignalBank};
use crate::dispatcher::CommandEngine;
use crate::serial::{PacketLink, SerialChannel};

/// Run one iteration of the loop
///
/// Returns the number of bytes handed to the engine.
pub fn service<L: PacketLink, S: SignalBank>(
    channel: &mut SerialChannel<L>,
    engine: &mut CommandEngine,
    device: &mut DeviceControl<S>,
) -> usize {
    channel.poll();

    let mut packet = [0u8; BULK_MAX_PACKET];
    let n = channel.read(&mut packet);
    if n > 0 {
        log::trace!("rx {:?}", &packet[..n]);
        engine.feed_all(&packet[..n], channel, device);
    }
    n
}

/// Run the loop forever
pub fn run<L: PacketLink, S: SignalBank>(
    mut channel: SerialChannel<L>,
    mut engine: CommandEngine,
    mut device: DeviceControl<S>,
) -> ! {
    log::info!("Command loop running");
    loop {
        service(&mut channel, &mut engine, &mut device);
    }
}
