//! CDC-ACM class for the polled usb-device stack
//!
//! One control interface with an interrupt notification endpoint (declared,
//! never used) and one data interface with bulk OUT and bulk IN endpoints.
//! OUT packets land in the receive holding slot from the stack's callback.

use crate::config::usb::BULK_MAX_PACKET;
use crate::usb::descriptors::{
    functional_descriptors, request, CDC_PROTOCOL_AT, CDC_SUBCLASS_ACM, CS_INTERFACE, ENDPOINTS,
    LINE_CODING_LEN, USB_CLASS_CDC, USB_CLASS_CDC_DATA,
};
use crate::usb::rx_slot::RxSlot;
use usb_device::class_prelude::*;
use usb_device::control::{Recipient, Request, RequestType};

/// Outcome for a class request addressed to the control interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPolicy {
    /// Acknowledge the request
    Accept,
    /// Report the request as unsupported (STALL)
    Reject,
}

/// Decide how to answer a host-to-device class request
///
/// `SET_CONTROL_LINE_STATE` is always acknowledged. `SET_LINE_CODING` is
/// acknowledged only when the payload carries a full line coding structure;
/// its values are ignored. Everything else is unsupported.
pub fn control_out_policy(request: u8, data_len: usize) -> ControlPolicy {
    match request {
        request::SET_CONTROL_LINE_STATE => ControlPolicy::Accept,
        request::SET_LINE_CODING if data_len >= LINE_CODING_LEN => ControlPolicy::Accept,
        _ => ControlPolicy::Reject,
    }
}

/// CDC-ACM function with a single-packet receive slot
pub struct CdcAcmClass<'a, B: UsbBus> {
    comm_if: InterfaceNumber,
    comm_ep: EndpointIn<'a, B>,
    data_if: InterfaceNumber,
    read_ep: EndpointOut<'a, B>,
    write_ep: EndpointIn<'a, B>,
    rx_slot: RxSlot,
}

impl<'a, B: UsbBus> CdcAcmClass<'a, B> {
    /// Allocate both interfaces and all three endpoints
    ///
    /// Must be called before the device is built from the same allocator.
    pub fn new(alloc: &'a UsbBusAllocator<B>) -> Result<Self, UsbError> {
        let comm_if = alloc.interface();
        let comm_ep = alloc.alloc(
            Some(EndpointAddress::from(ENDPOINTS.notify_in)),
            EndpointType::Interrupt,
            ENDPOINTS.notify_max_packet,
            ENDPOINTS.notify_interval,
        )?;

        let data_if = alloc.interface();
        let read_ep = alloc.alloc(
            Some(EndpointAddress::from(ENDPOINTS.data_out)),
            EndpointType::Bulk,
            ENDPOINTS.data_max_packet,
            0,
        )?;
        let write_ep = alloc.alloc(
            Some(EndpointAddress::from(ENDPOINTS.data_in)),
            EndpointType::Bulk,
            ENDPOINTS.data_max_packet,
            0,
        )?;

        Ok(Self {
            comm_if,
            comm_ep,
            data_if,
            read_ep,
            write_ep,
            rx_slot: RxSlot::new(),
        })
    }

    /// Drain the receive holding slot
    pub fn read_packet(&mut self, buf: &mut [u8]) -> usize {
        self.rx_slot.take(buf)
    }

    /// Hand one packet to the bulk IN endpoint
    ///
    /// Returns `UsbError::WouldBlock` while the previous packet is unsent.
    pub fn write_packet(&mut self, data: &[u8]) -> Result<usize, UsbError> {
        self.write_ep.write(data)
    }

    pub fn control_interface(&self) -> InterfaceNumber {
        self.comm_if
    }

    pub fn data_interface(&self) -> InterfaceNumber {
        self.data_if
    }

    pub fn notify_address(&self) -> EndpointAddress {
        self.comm_ep.address()
    }

    pub fn data_out_address(&self) -> EndpointAddress {
        self.read_ep.address()
    }

    pub fn data_in_address(&self) -> EndpointAddress {
        self.write_ep.address()
    }

    /// Returns true if the request targets our control interface as a class request
    fn is_ours(&self, req: &Request) -> bool {
        req.request_type == RequestType::Class
            && req.recipient == Recipient::Interface
            && req.index == u16::from(u8::from(self.comm_if))
    }
}

impl<B: UsbBus> UsbClass<B> for CdcAcmClass<'_, B> {
    fn get_configuration_descriptors(&self, writer: &mut DescriptorWriter) -> usb_device::Result<()> {
        let functional = functional_descriptors(u8::from(self.comm_if), u8::from(self.data_if));

        writer.interface(self.comm_if, USB_CLASS_CDC, CDC_SUBCLASS_ACM, CDC_PROTOCOL_AT)?;
        writer.write(CS_INTERFACE, &functional.header)?;
        writer.write(CS_INTERFACE, &functional.call_management)?;
        writer.write(CS_INTERFACE, &functional.acm)?;
        writer.write(CS_INTERFACE, &functional.union)?;
        writer.endpoint(&self.comm_ep)?;

        writer.interface(self.data_if, USB_CLASS_CDC_DATA, 0x00, 0x00)?;
        writer.endpoint(&self.read_ep)?;
        writer.endpoint(&self.write_ep)?;

        Ok(())
    }

    fn reset(&mut self) {
        self.rx_slot.clear();
    }

    fn endpoint_out(&mut self, addr: EndpointAddress) {
        if addr != self.read_ep.address() {
            return;
        }

        let mut packet = [0u8; BULK_MAX_PACKET];
        match self.read_ep.read(&mut packet) {
            Ok(n) => {
                log::trace!("rx {} bytes", n);
                self.rx_slot.store(&packet[..n]);
            }
            Err(UsbError::WouldBlock) => {}
            Err(e) => log::warn!("bulk OUT read failed: {:?}", e),
        }
    }

    fn control_in(&mut self, xfer: ControlIn<B>) {
        let req = *xfer.request();
        if !self.is_ours(&req) {
            return;
        }

        // GET_LINE_CODING included: there is no line coding to report
        log::debug!("unsupported class IN request 0x{:02x}", req.request);
        let _ = xfer.reject();
    }

    fn control_out(&mut self, xfer: ControlOut<B>) {
        let req = *xfer.request();
        if !self.is_ours(&req) {
            return;
        }

        match control_out_policy(req.request, xfer.data().len()) {
            ControlPolicy::Accept => {
                let _ = xfer.accept();
            }
            ControlPolicy::Reject => {
                log::debug!("unsupported class OUT request 0x{:02x}", req.request);
                let _ = xfer.reject();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_line_state_always_accepted() {
        assert_eq!(
            control_out_policy(request::SET_CONTROL_LINE_STATE, 0),
            ControlPolicy::Accept
        );
    }

    #[test]
    fn test_line_coding_needs_full_structure() {
        assert_eq!(control_out_policy(request::SET_LINE_CODING, 7), ControlPolicy::Accept);
        assert_eq!(control_out_policy(request::SET_LINE_CODING, 8), ControlPolicy::Accept);
        assert_eq!(control_out_policy(request::SET_LINE_CODING, 6), ControlPolicy::Reject);
        assert_eq!(control_out_policy(request::SET_LINE_CODING, 0), ControlPolicy::Reject);
    }

    #[test]
    fn test_other_requests_rejected() {
        // SEND_BREAK
        assert_eq!(control_out_policy(0x23, 0), ControlPolicy::Reject);
        assert_eq!(control_out_policy(request::GET_LINE_CODING, 7), ControlPolicy::Reject);
        // SEND_ENCAPSULATED_COMMAND
        assert_eq!(control_out_policy(0x00, 16), ControlPolicy::Reject);
    }
}
