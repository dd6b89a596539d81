//! Receive holding slot
//!
//! Bridges packets handed over by the USB stack and the polled `read`.

use crate::config::usb::BULK_MAX_PACKET;

/// Single most-recent OUT packet
///
/// Holds at most one packet. Storing while a packet is held overwrites it;
/// taking empties the slot.
pub struct RxSlot {
    buf: [u8; BULK_MAX_PACKET],
    len: usize,
}

impl RxSlot {
    pub const fn new() -> Self {
        Self {
            buf: [0; BULK_MAX_PACKET],
            len: 0,
        }
    }

    /// Replace the held packet. Bytes past the max packet size are dropped.
    pub fn store(&mut self, data: &[u8]) {
        let n = data.len().min(BULK_MAX_PACKET);
        self.buf[..n].copy_from_slice(&data[..n]);
        self.len = n;
    }

    /// Copy out up to `out.len()` bytes and empty the slot
    ///
    /// Returns 0 if nothing is held.
    pub fn take(&mut self, out: &mut [u8]) -> usize {
        if self.len == 0 {
            return 0;
        }

        let n = self.len.min(out.len());
        out[..n].copy_from_slice(&self.buf[..n]);
        self.len = 0;
        n
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

impl Default for RxSlot {
    fn default() -> Self {
        Self::new()
    }
}
