//! Device communication client.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use serialport::{SerialPort, SerialPortType};
use thiserror::Error;

use crate::protocol::{
    build_line, build_query, build_set, parse_fault, parse_level, parse_status, Malformed, Signal,
    Status, PID, VID,
};

/// Errors from talking to the mux controller
#[derive(Debug, Error)]
pub enum MuxError {
    #[error("No USBMux device found (VID={vid:04X}, PID={pid:04X})")]
    NotFound { vid: u16, pid: u16 },

    #[error("Fault on channel {channel} (overcurrent or thermal)")]
    Fault { channel: u8 },

    #[error("Malformed response: {0:?}")]
    Malformed(String),

    #[error("Timeout waiting for response, got {0:?}")]
    Timeout(String),

    #[error(transparent)]
    Serial(#[from] serialport::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<Malformed> for MuxError {
    fn from(error: Malformed) -> Self {
        MuxError::Malformed(error.0)
    }
}

pub type Result<T> = std::result::Result<T, MuxError>;

/// Find the first serial port enumerated with the firmware's VID/PID.
pub fn find_device() -> Result<String> {
    let ports = serialport::available_ports()?;

    ports
        .into_iter()
        .find(|port| {
            matches!(&port.port_type, SerialPortType::UsbPort(usb) if usb.vid == VID && usb.pid == PID)
        })
        .map(|port| port.port_name)
        .ok_or(MuxError::NotFound { vid: VID, pid: PID })
}

/// Resolve a port argument - returns the port path if not "auto", otherwise auto-detects.
pub fn resolve_port(port_arg: &str) -> Result<String> {
    if port_arg == "auto" {
        find_device()
    } else {
        Ok(port_arg.to_string())
    }
}

/// Client for the USB mux controller.
///
/// Set commands are fire-and-forget; queries clear the input buffer first
/// and then read a single CRLF-terminated line.
pub struct MuxClient {
    port: Box<dyn SerialPort>,
    timeout: Duration,
}

impl MuxClient {
    /// Open the port. The baud rate is ignored by the CDC device.
    pub fn new(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()?;

        Ok(Self {
            port,
            timeout: Duration::from_secs(1),
        })
    }

    /// Set the response timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Discard anything pending in either direction.
    pub fn clear_buffer(&mut self) -> Result<()> {
        self.port.clear(serialport::ClearBuffer::All)?;
        Ok(())
    }

    /// Write raw bytes exactly as given.
    pub fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    /// Send a command that has no response.
    pub fn send(&mut self, command: &str) -> Result<()> {
        self.send_raw(build_line(command).as_bytes())
    }

    /// Send a command and return its response line without the terminator.
    pub fn query(&mut self, command: &str) -> Result<String> {
        self.port.clear(serialport::ClearBuffer::Input)?;
        self.send(command)?;
        self.read_line(self.timeout)
    }

    /// Read one CRLF-terminated line.
    pub fn read_line(&mut self, timeout: Duration) -> Result<String> {
        let mut data = Vec::new();
        let mut buf = [0u8; 1];
        let start = Instant::now();

        while start.elapsed() < timeout {
            match self.port.read(&mut buf) {
                Ok(1) => {
                    data.push(buf[0]);
                    if data.ends_with(b"\r\n") {
                        data.truncate(data.len() - 2);
                        return Ok(String::from_utf8_lossy(&data).into_owned());
                    }
                }
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(MuxError::Timeout(String::from_utf8_lossy(&data).into_owned()))
    }

    /// Collect whatever arrives within `window`.
    pub fn read_available(&mut self, window: Duration) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let mut buf = [0u8; 64];
        let start = Instant::now();

        while start.elapsed() < window {
            match self.port.read(&mut buf) {
                Ok(n) => data.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(data)
    }

    /// Read a signal.
    pub fn get(&mut self, signal: Signal) -> Result<bool> {
        let line = self.query(build_query(signal).trim_end())?;
        Ok(parse_level(&line)?)
    }

    /// Drive a signal.
    ///
    /// Enabling a VBUS channel waits for the firmware to process the set,
    /// then fails with `MuxError::Fault` if that channel reports a fault.
    pub fn set(&mut self, signal: Signal, level: bool) -> Result<()> {
        self.send_raw(build_set(signal, level).as_bytes())?;

        if let (true, Some(channel)) = (level, signal.channel()) {
            self.get(signal)?;
            self.check_fault(channel)?;
        }
        Ok(())
    }

    pub fn sel(&mut self) -> Result<bool> {
        self.get(Signal::Sel)
    }

    pub fn set_sel(&mut self, level: bool) -> Result<()> {
        self.set(Signal::Sel, level)
    }

    pub fn oe(&mut self) -> Result<bool> {
        self.get(Signal::Oe)
    }

    pub fn set_oe(&mut self, enabled: bool) -> Result<()> {
        self.set(Signal::Oe, enabled)
    }

    pub fn en0(&mut self) -> Result<bool> {
        self.get(Signal::En0)
    }

    pub fn set_en0(&mut self, enabled: bool) -> Result<()> {
        self.set(Signal::En0, enabled)
    }

    pub fn en1(&mut self) -> Result<bool> {
        self.get(Signal::En1)
    }

    pub fn set_en1(&mut self, enabled: bool) -> Result<()> {
        self.set(Signal::En1, enabled)
    }

    /// Fault flags for channel 0 and channel 1.
    pub fn fault(&mut self) -> Result<(bool, bool)> {
        let line = self.query("FAULT?")?;
        Ok(parse_fault(&line)?)
    }

    /// Full device status.
    pub fn status(&mut self) -> Result<Status> {
        let line = self.query("STATUS?")?;
        Ok(parse_status(&line)?)
    }

    fn check_fault(&mut self, channel: u8) -> Result<()> {
        let (f0, f1) = self.fault()?;
        let faulted = match channel {
            0 => f0,
            _ => f1,
        };
        if faulted {
            return Err(MuxError::Fault { channel });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MuxError::NotFound { vid: VID, pid: PID }.to_string(),
            "No USBMux device found (VID=0483, PID=5740)"
        );
        assert_eq!(
            MuxError::Fault { channel: 1 }.to_string(),
            "Fault on channel 1 (overcurrent or thermal)"
        );
        assert_eq!(
            MuxError::from(Malformed("x".to_string())).to_string(),
            "Malformed response: \"x\""
        );
    }

    #[test]
    fn test_explicit_port_is_not_probed() {
        assert_eq!(resolve_port("/dev/ttyACM3").unwrap(), "/dev/ttyACM3");
    }
}
