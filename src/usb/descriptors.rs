//! Static USB descriptor data for the CDC-ACM device
//!
//! Data only. The device builder and the class read these tables; no
//! behaviour lives here.

use crate::config::usb;

/// Communications Device Class
pub const USB_CLASS_CDC: u8 = 0x02;
/// CDC Data interface class
pub const USB_CLASS_CDC_DATA: u8 = 0x0A;
/// Abstract Control Model subclass
pub const CDC_SUBCLASS_ACM: u8 = 0x02;
/// AT commands (V.250) protocol
pub const CDC_PROTOCOL_AT: u8 = 0x01;

/// Class-specific interface descriptor type
pub const CS_INTERFACE: u8 = 0x24;

/// Functional descriptor subtypes
pub mod subtype {
    pub const HEADER: u8 = 0x00;
    pub const CALL_MANAGEMENT: u8 = 0x01;
    pub const ACM: u8 = 0x02;
    pub const UNION: u8 = 0x06;
}

/// CDC class requests
pub mod request {
    pub const SET_LINE_CODING: u8 = 0x20;
    pub const GET_LINE_CODING: u8 = 0x21;
    pub const SET_CONTROL_LINE_STATE: u8 = 0x22;
}

/// bcdCDC 1.10
pub const CDC_RELEASE: u16 = 0x0110;

/// dwDTERate + bCharFormat + bParityType + bDataBits
pub const LINE_CODING_LEN: usize = 7;

/// Device-level identity handed to the USB stack
#[derive(Debug, Clone, Copy)]
pub struct DeviceDescriptor {
    pub vid: u16,
    pub pid: u16,
    pub release: u16,
    pub class: u8,
    pub max_packet_size_0: u8,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
    pub self_powered: bool,
    pub max_power_ma: usize,
}

pub const DEVICE: DeviceDescriptor = DeviceDescriptor {
    vid: usb::VID,
    pid: usb::PID,
    release: usb::DEVICE_RELEASE,
    class: USB_CLASS_CDC,
    max_packet_size_0: usb::EP0_MAX_PACKET,
    manufacturer: usb::MANUFACTURER,
    product: usb::PRODUCT,
    serial_number: usb::SERIAL_NUMBER,
    self_powered: false,
    max_power_ma: usb::MAX_POWER_MA,
};

/// Endpoint layout of the two interfaces
#[derive(Debug, Clone, Copy)]
pub struct EndpointLayout {
    pub notify_in: u8,
    pub notify_max_packet: u16,
    pub notify_interval: u8,
    pub data_out: u8,
    pub data_in: u8,
    pub data_max_packet: u16,
}

pub const ENDPOINTS: EndpointLayout = EndpointLayout {
    notify_in: usb::NOTIFY_IN_ADDR,
    notify_max_packet: usb::NOTIFY_MAX_PACKET,
    notify_interval: usb::NOTIFY_INTERVAL,
    data_out: usb::DATA_OUT_ADDR,
    data_in: usb::DATA_IN_ADDR,
    data_max_packet: usb::BULK_MAX_PACKET as u16,
};

/// Bodies of the CDC functional descriptors (after length and type)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalDescriptors {
    pub header: [u8; 3],
    pub call_management: [u8; 3],
    pub acm: [u8; 2],
    pub union: [u8; 3],
}

/// Functional descriptors for a control/data interface pair
///
/// No call management and no ACM capabilities: line coding and control
/// line state are accepted but have no effect.
pub const fn functional_descriptors(comm_if: u8, data_if: u8) -> FunctionalDescriptors {
    let release = CDC_RELEASE.to_le_bytes();
    FunctionalDescriptors {
        header: [subtype::HEADER, release[0], release[1]],
        call_management: [subtype::CALL_MANAGEMENT, 0x00, data_if],
        acm: [subtype::ACM, 0x00],
        union: [subtype::UNION, comm_if, data_if],
    }
}
