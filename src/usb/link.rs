//! USB device plus CDC-ACM class, exposed as a packet link
//!
//! Registers the descriptors with usb-device and drives the stack on poll.

use crate::serial::traits::{LinkError, PacketLink};
use crate::usb::cdc_acm::CdcAcmClass;
use crate::usb::descriptors::DEVICE;
use usb_device::bus::{UsbBus, UsbBusAllocator};
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid};

/// Enumerable CDC-ACM device
pub struct UsbLink<'a, B: UsbBus> {
    device: UsbDevice<'a, B>,
    class: CdcAcmClass<'a, B>,
    state: UsbDeviceState,
}

impl<'a, B: UsbBus> UsbLink<'a, B> {
    /// Allocate the class and build the device
    ///
    /// The device becomes enumerable once the bus is polled.
    pub fn new(alloc: &'a UsbBusAllocator<B>) -> Result<Self, LinkError> {
        let class = CdcAcmClass::new(alloc).map_err(LinkError::Endpoint)?;

        let device = UsbDeviceBuilder::new(alloc, UsbVidPid(DEVICE.vid, DEVICE.pid))
            .strings(&[StringDescriptors::default()
                .manufacturer(DEVICE.manufacturer)
                .product(DEVICE.product)
                .serial_number(DEVICE.serial_number)])
            .map_err(|_| LinkError::Descriptor)?
            .device_class(DEVICE.class)
            .device_release(DEVICE.release)
            .self_powered(DEVICE.self_powered)
            .max_packet_size_0(DEVICE.max_packet_size_0)
            .map_err(|_| LinkError::Descriptor)?
            .max_power(DEVICE.max_power_ma)
            .map_err(|_| LinkError::Descriptor)?
            .build();

        log::info!(
            "USB CDC-ACM device {:04x}:{:04x} registered",
            DEVICE.vid,
            DEVICE.pid
        );

        Ok(Self {
            device,
            class,
            state: UsbDeviceState::Default,
        })
    }

    fn track_state(&mut self) {
        let state = self.device.state();
        if state != self.state {
            log::info!("USB state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

impl<B: UsbBus> PacketLink for UsbLink<'_, B> {
    fn poll(&mut self) -> bool {
        let active = self.device.poll(&mut [&mut self.class]);
        self.track_state();
        active
    }

    fn read_packet(&mut self, buf: &mut [u8]) -> usize {
        self.class.read_packet(buf)
    }

    fn write_packet(&mut self, packet: &[u8]) -> Result<(), LinkError> {
        if self.device.state() != UsbDeviceState::Configured {
            return Err(LinkError::NotConfigured);
        }

        self.class.write_packet(packet)?;
        log::trace!("tx {} bytes", packet.len());
        Ok(())
    }
}
