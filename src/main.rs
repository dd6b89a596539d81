#![no_std]
#![no_main]

// Required for ESP-IDF bootloader compatibility
// Use explicit parameters to ensure correct efuse block revision values
esp_bootloader_esp_idf::esp_app_desc!(
    env!("CARGO_PKG_VERSION"),  // version
    env!("CARGO_PKG_NAME"),     // project_name
    "00:00:00",                 // build_time
    "2025-01-01",               // build_date
    "0.0.0",                    // idf_ver (not using IDF)
    0x10000,                    // mmu_page_size (64KB)
    0,                          // min_efuse_blk_rev_full (accept all)
    u16::MAX                    // max_efuse_blk_rev_full (accept all)
);

use esp_backtrace as _;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::otg_fs::{Usb, UsbBus};
use static_cell::StaticCell;
use usb_device::bus::UsbBusAllocator;

use usbmux_firmware::config;
use usbmux_firmware::device::{DeviceControl, PinBank};
use usbmux_firmware::dispatcher::CommandEngine;
use usbmux_firmware::run_loop;
use usbmux_firmware::serial::SerialChannel;
use usbmux_firmware::usb::UsbLink;

/// Endpoint FIFO memory for the OTG driver
static EP_MEMORY: StaticCell<[u32; config::usb::EP_MEMORY_WORDS]> = StaticCell::new();

/// USB bus allocator (endpoints borrow from it for 'static)
static USB_BUS: StaticCell<UsbBusAllocator<UsbBus<Usb<'static>>>> = StaticCell::new();

#[esp_hal::main]
fn main() -> ! {
    // UART0 carries the log; the OTG PHY belongs to the CDC device
    esp_println::logger::init_logger(config::logging::DEFAULT_LEVEL);
    log::info!("USB mux controller v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Outputs start at their safe levels: nOE high, everything else low.
    // Fault inputs are open drain with external pull-ups; add internal ones too.
    let mux_noe = Output::new(peripherals.GPIO4, Level::High, OutputConfig::default());
    let mux_sel = Output::new(peripherals.GPIO5, Level::Low, OutputConfig::default());
    let en0 = Output::new(peripherals.GPIO6, Level::Low, OutputConfig::default());
    let nfault0 = Input::new(peripherals.GPIO7, InputConfig::default().with_pull(Pull::Up));
    let en1 = Output::new(peripherals.GPIO15, Level::Low, OutputConfig::default());
    let nfault1 = Input::new(peripherals.GPIO16, InputConfig::default().with_pull(Pull::Up));

    let bank = PinBank::new(mux_sel, mux_noe, en0, en1, nfault0, nfault1);
    let device = DeviceControl::new(bank);
    log::info!(
        "Mux and VBUS signals on GPIO{}/{}/{}/{}, faults on GPIO{}/{}",
        config::pins::MUX_SEL,
        config::pins::MUX_NOE,
        config::pins::EN0,
        config::pins::EN1,
        config::pins::NFAULT0,
        config::pins::NFAULT1
    );

    // Full-speed OTG on the internal PHY (D+ GPIO20, D- GPIO19)
    let usb = Usb::new(peripherals.USB0, peripherals.GPIO20, peripherals.GPIO19);
    let ep_memory = EP_MEMORY.init([0; config::usb::EP_MEMORY_WORDS]);
    let usb_bus = USB_BUS.init(UsbBus::new(usb, ep_memory));

    let link = UsbLink::new(usb_bus).expect("Failed to build USB device");
    let channel = SerialChannel::new(link);

    run_loop::run(channel, CommandEngine::new(), device)
}
