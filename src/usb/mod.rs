//! USB CDC-ACM transport on the polled usb-device stack.
//!
//! Provides a single virtual COM port:
//! - `descriptors`: static device and class descriptor data
//! - `cdc_acm`: the class, control-request policy and receive slot wiring
//! - `link`: the built device, exposed as a `PacketLink`

pub mod cdc_acm;
pub mod descriptors;
pub mod link;
pub mod rx_slot;

pub use cdc_acm::{CdcAcmClass, ControlPolicy};
pub use link::UsbLink;
pub use rx_slot::RxSlot;
