//! Device control for the USB mux and VBUS power paths
//!
//! - `traits`: the raw signal bank seam
//! - `control`: logical state and polarity translation
//! - `pins`: embedded-hal backed signal bank

pub mod control;
pub mod pins;
pub mod traits;

pub use control::{DeviceControl, DeviceStatus};
pub use pins::PinBank;
pub use traits::{InputLine, OutputLine, SignalBank};
