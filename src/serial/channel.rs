//! Byte-stream channel over the packet link
//!
//! Non-blocking read and chunked, cooperatively blocking write.

use crate::config::usb::BULK_MAX_PACKET;
use crate::serial::traits::{LinkError, PacketLink};

/// Duplex byte stream on top of a CDC-ACM packet link
///
/// `write` busy-waits by re-polling the link until each chunk is taken.
/// It must not be called from inside a USB stack callback.
pub struct SerialChannel<L: PacketLink> {
    link: L,
}

impl<L: PacketLink> SerialChannel<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    /// Drive the USB stack
    pub fn poll(&mut self) -> bool {
        self.link.poll()
    }

    /// Copy out the held packet, if any. Never blocks.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        self.link.read_packet(buf)
    }

    /// Send `data` in max-packet chunks
    ///
    /// Each chunk is retried, polling in between, until the endpoint takes
    /// it. There is no timeout: a host that never drains stalls the caller.
    pub fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        for chunk in data.chunks(BULK_MAX_PACKET) {
            loop {
                match self.link.write_packet(chunk) {
                    Ok(()) => break,
                    Err(LinkError::Busy) => {
                        self.link.poll();
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

impl<L: PacketLink> embedded_io::ErrorType for SerialChannel<L> {
    type Error = LinkError;
}

impl<L: PacketLink> embedded_io::Write for SerialChannel<L> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        SerialChannel::<L>::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
