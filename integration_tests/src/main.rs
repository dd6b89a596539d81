//! Integration tests for the USB mux firmware.
//!
//! Run after flashing the firmware. Toggles the mux and both VBUS channels,
//! so keep sensitive loads disconnected.

mod device;
mod protocol;

use clap::Parser;
use colored::Colorize;

use device::{resolve_port, MuxClient};
use tests::{print_results, run_all_tests};

#[derive(Parser)]
#[command(name = "integration-tests")]
#[command(about = "Integration tests for the USB mux firmware")]
struct Args {
    /// Serial port for the device (use "auto" to detect by VID/PID)
    #[arg(short, long, default_value = "auto")]
    port: String,

    /// Baud rate (ignored by the CDC device)
    #[arg(short, long, default_value = "115200")]
    baud: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let port = resolve_port(&args.port)?;

    println!("{}", "USB Mux Integration Tests".bold());
    println!("Port: {}", port);
    println!();

    println!("Connecting to device...");
    let mut device = MuxClient::new(&port, args.baud)?;
    device.clear_buffer()?;
    println!("{}", "Connected!".green());

    println!("\nRunning tests...\n");

    let results = run_all_tests(&mut device);
    print_results(&results);

    // Exit with error code if any tests failed
    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
