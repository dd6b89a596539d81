//! Command-line control of the USB mux.

mod device;
mod protocol;

use clap::{Parser, Subcommand};
use colored::Colorize;

use device::{resolve_port, MuxClient, MuxError};
use protocol::Signal;

#[derive(Parser)]
#[command(name = "muxctl")]
#[command(about = "Control the USB mux and VBUS power switches")]
struct Args {
    /// Serial port for the device (use "auto" to detect by VID/PID)
    #[arg(short, long, default_value = "auto")]
    port: String,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print every signal and both fault flags
    Status,
    /// Print the fault flags of channel 0 and channel 1
    Fault,
    /// Query or set the mux select
    Sel { value: Option<Level> },
    /// Query or set the mux output enable
    Oe { value: Option<Level> },
    /// Query or set VBUS channel 0
    En0 { value: Option<Level> },
    /// Query or set VBUS channel 1
    En1 { value: Option<Level> },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Level {
    #[value(name = "0")]
    Low,
    #[value(name = "1")]
    High,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let port = resolve_port(&args.port)?;
    let mut mux = MuxClient::new(&port, 115200)?;

    let (signal, value) = match args.command {
        Action::Status => {
            println!("{}", mux.status()?);
            return Ok(());
        }
        Action::Fault => {
            let (f0, f1) = mux.fault()?;
            println!("{} {}", u8::from(f0), u8::from(f1));
            return Ok(());
        }
        Action::Sel { value } => (Signal::Sel, value),
        Action::Oe { value } => (Signal::Oe, value),
        Action::En0 { value } => (Signal::En0, value),
        Action::En1 { value } => (Signal::En1, value),
    };

    match value {
        None => println!("{}", u8::from(mux.get(signal)?)),
        Some(level) => match mux.set(signal, matches!(level, Level::High)) {
            Ok(()) => {}
            Err(e @ MuxError::Fault { .. }) => {
                eprintln!("{}", e.to_string().red().bold());
                std::process::exit(2);
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
