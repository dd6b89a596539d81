//! Packet link trait for abstraction and testability
//!
//! This trait defines the packet-level interface of the USB CDC-ACM data
//! interface, allowing the real USB stack to be swapped with a mock for
//! testing.

use usb_device::UsbError;

/// Errors that can occur on the packet link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The IN endpoint still holds an unsent packet; poll and retry
    Busy,
    /// The device is not in the configured state
    NotConfigured,
    /// The USB stack reported a non-retryable endpoint error
    Endpoint(UsbError),
    /// The USB device could not be built from its descriptors
    Descriptor,
}

impl From<UsbError> for LinkError {
    fn from(error: UsbError) -> Self {
        match error {
            UsbError::WouldBlock => LinkError::Busy,
            other => LinkError::Endpoint(other),
        }
    }
}

impl embedded_io::Error for LinkError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            LinkError::NotConfigured => embedded_io::ErrorKind::NotConnected,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

/// Abstract packet interface for testability
///
/// Reception goes through a single holding slot: a packet that arrives
/// before the previous one is drained replaces it.
pub trait PacketLink {
    /// Drive the USB stack forward. Never blocks.
    ///
    /// Returns true if the stack reported activity for the class.
    fn poll(&mut self) -> bool;

    /// Drain the holding slot into `buf`
    ///
    /// Returns 0 if no packet is held. Bytes that do not fit are dropped.
    fn read_packet(&mut self, buf: &mut [u8]) -> usize;

    /// Offer one packet, at most one max-packet long, to the IN endpoint
    ///
    /// Returns `LinkError::Busy` if the endpoint cannot take it yet.
    fn write_packet(&mut self, packet: &[u8]) -> Result<(), LinkError>;
}

#[cfg(test)]
pub mod mock {
    //! Mock packet link for testing

    use super::*;
    use crate::config::usb::BULK_MAX_PACKET;
    use crate::usb::rx_slot::RxSlot;
    use heapless::{Deque, Vec};

    /// Packet as seen on the wire
    pub type Packet = Vec<u8, BULK_MAX_PACKET>;

    /// Mock packet link for unit testing
    pub struct MockPacketLink {
        /// Packets the "host" will send, delivered one per poll
        host_packets: Deque<Packet, 16>,
        /// Holding slot filled on poll
        slot: RxSlot,
        /// Packets accepted by write_packet()
        tx_packets: Vec<Packet, 16>,
        /// Number of write attempts to reject with Busy
        busy_writes: usize,
        /// Error to return on next write
        next_write_error: Option<LinkError>,
        /// Number of poll() calls
        polls: usize,
    }

    impl MockPacketLink {
        /// Create a new mock link
        pub fn new() -> Self {
            Self {
                host_packets: Deque::new(),
                slot: RxSlot::new(),
                tx_packets: Vec::new(),
                busy_writes: 0,
                next_write_error: None,
                polls: 0,
            }
        }

        /// Queue a packet from the host, delivered on a later poll()
        pub fn queue_host_packet(&mut self, data: &[u8]) {
            let mut packet = Packet::new();
            let _ = packet.extend_from_slice(data);
            let _ = self.host_packets.push_back(packet);
        }

        /// Place a packet directly into the holding slot
        pub fn deliver_now(&mut self, data: &[u8]) {
            self.slot.store(data);
        }

        /// Reject the next `count` write attempts with Busy
        pub fn set_busy_writes(&mut self, count: usize) {
            self.busy_writes = count;
        }

        /// Set an error to be returned by the next write attempt
        pub fn set_next_write_error(&mut self, error: LinkError) {
            self.next_write_error = Some(error);
        }

        /// Packets accepted so far
        pub fn tx_packets(&self) -> &[Packet] {
            &self.tx_packets
        }

        /// All accepted bytes concatenated
        pub fn tx_bytes(&self) -> std::vec::Vec<u8> {
            self.tx_packets.iter().flat_map(|p| p.iter().copied()).collect()
        }

        /// Forget accepted packets
        pub fn clear_tx(&mut self) {
            self.tx_packets.clear();
        }

        /// Number of poll() calls so far
        pub fn polls(&self) -> usize {
            self.polls
        }

        /// Returns true if packets are still waiting to be delivered
        pub fn has_pending(&self) -> bool {
            !self.host_packets.is_empty()
        }
    }

    impl Default for MockPacketLink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PacketLink for MockPacketLink {
        fn poll(&mut self) -> bool {
            self.polls += 1;
            match self.host_packets.pop_front() {
                Some(packet) => {
                    self.slot.store(&packet);
                    true
                }
                None => false,
            }
        }

        fn read_packet(&mut self, buf: &mut [u8]) -> usize {
            self.slot.take(buf)
        }

        fn write_packet(&mut self, packet: &[u8]) -> Result<(), LinkError> {
            assert!(packet.len() <= BULK_MAX_PACKET, "packet exceeds max packet size");

            if let Some(error) = self.next_write_error.take() {
                return Err(error);
            }

            if self.busy_writes > 0 {
                self.busy_writes -= 1;
                return Err(LinkError::Busy);
            }

            let mut sent = Packet::new();
            let _ = sent.extend_from_slice(packet);
            self.tx_packets
                .push(sent)
                .map_err(|_| LinkError::Endpoint(UsbError::BufferOverflow))?;
            Ok(())
        }
    }
}
