//! Hardware configuration constants for the ESP32-S3 USB mux controller

/// GPIO assignments for the mux and VBUS power-path signals
pub mod pins {
    /// Mux output enable, active low
    pub const MUX_NOE: u8 = 4;
    pub const MUX_SEL: u8 = 5;
    /// VBUS channel 0 enable
    pub const EN0: u8 = 6;
    /// VBUS channel 0 fault, active low with external pull-up
    pub const NFAULT0: u8 = 7;
    /// VBUS channel 1 enable
    pub const EN1: u8 = 15;
    /// VBUS channel 1 fault, active low with external pull-up
    pub const NFAULT1: u8 = 16;
}

/// USB device identity and endpoint layout
pub mod usb {
    /// STMicroelectronics VID, kept so existing host tooling finds the device
    pub const VID: u16 = 0x0483;
    /// Virtual COM port PID
    pub const PID: u16 = 0x5740;
    /// bcdDevice
    pub const DEVICE_RELEASE: u16 = 0x0100;

    pub const MANUFACTURER: &str = "USBMux";
    pub const PRODUCT: &str = "USBMux CDC";
    pub const SERIAL_NUMBER: &str = "001";

    /// Control endpoint max packet size
    pub const EP0_MAX_PACKET: u8 = 64;
    /// Bulk IN/OUT max packet size
    pub const BULK_MAX_PACKET: usize = 64;
    /// Notification endpoint max packet size
    pub const NOTIFY_MAX_PACKET: u16 = 16;
    /// Notification endpoint polling interval
    pub const NOTIFY_INTERVAL: u8 = 255;

    pub const DATA_OUT_ADDR: u8 = 0x01;
    pub const DATA_IN_ADDR: u8 = 0x82;
    pub const NOTIFY_IN_ADDR: u8 = 0x83;

    /// Bus powered draw in mA (bMaxPower 0x32)
    pub const MAX_POWER_MA: usize = 100;

    /// Words of endpoint FIFO memory handed to the OTG driver
    pub const EP_MEMORY_WORDS: usize = 1024;
}

/// Line protocol constants
pub mod protocol {
    /// Command line buffer size including the reserved terminator slot
    pub const LINE_BUFFER_SIZE: usize = 64;

    /// Usable bytes in a command line
    pub const MAX_LINE_LEN: usize = LINE_BUFFER_SIZE - 1;

    /// Longest response line, excluding CRLF
    pub const MAX_RESPONSE_LEN: usize = 48;

    pub const CR: u8 = b'\r';
    pub const LF: u8 = b'\n';
    pub const SPACE: u8 = b' ';

    /// Response line terminator
    pub const LINE_ENDING: &[u8] = b"\r\n";
}

/// Logging configuration
pub mod logging {
    /// Level installed by the firmware logger at boot
    pub const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Info;
}
