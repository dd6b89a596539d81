//! Line protocol definitions matching the firmware.

#![allow(dead_code)]

/// USB identity the firmware enumerates with
pub const VID: u16 = 0x0483;
pub const PID: u16 = 0x5740;

/// Line terminator for commands and responses
pub const LINE_ENDING: &str = "\r\n";

/// Firmware command buffer size, terminator slot included
pub const LINE_BUFFER_SIZE: usize = 64;

/// Signals settable and queryable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Sel,
    Oe,
    En0,
    En1,
}

impl Signal {
    pub const ALL: [Signal; 4] = [Signal::Sel, Signal::Oe, Signal::En0, Signal::En1];

    pub fn keyword(self) -> &'static str {
        match self {
            Signal::Sel => "SEL",
            Signal::Oe => "OE",
            Signal::En0 => "EN0",
            Signal::En1 => "EN1",
        }
    }

    /// VBUS channel number for the enable signals
    pub fn channel(self) -> Option<u8> {
        match self {
            Signal::En0 => Some(0),
            Signal::En1 => Some(1),
            _ => None,
        }
    }
}

/// Parsed `STATUS?` response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    pub sel: bool,
    pub oe: bool,
    pub en0: bool,
    pub en1: bool,
    pub f0: bool,
    pub f1: bool,
}

impl Status {
    pub fn get(&self, signal: Signal) -> bool {
        match signal {
            Signal::Sel => self.sel,
            Signal::Oe => self.oe,
            Signal::En0 => self.en0,
            Signal::En1 => self.en1,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SEL={} OE={} EN0={} EN1={} F0={} F1={}",
            digit(self.sel),
            digit(self.oe),
            digit(self.en0),
            digit(self.en1),
            digit(self.f0),
            digit(self.f1)
        )
    }
}

/// Response line that does not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed(pub String);

/// Build a set command line, terminator included
pub fn build_set(signal: Signal, level: bool) -> String {
    format!("{} {}{}", signal.keyword(), digit(level), LINE_ENDING)
}

/// Build a query line for a signal, terminator included
pub fn build_query(signal: Signal) -> String {
    format!("{}?{}", signal.keyword(), LINE_ENDING)
}

/// Build an arbitrary command line
pub fn build_line(text: &str) -> String {
    format!("{}{}", text, LINE_ENDING)
}

/// Parse a lone `0` or `1`
pub fn parse_level(line: &str) -> Result<bool, Malformed> {
    match line.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(Malformed(line.to_string())),
    }
}

/// Parse a `FAULT?` response: `<f0> <f1>`
pub fn parse_fault(line: &str) -> Result<(bool, bool), Malformed> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(f0), Some(f1), None) => Ok((parse_level(f0)?, parse_level(f1)?)),
        _ => Err(Malformed(line.to_string())),
    }
}

/// Parse a `STATUS?` response of `KEY=V` pairs
///
/// Keys are matched case-insensitively; every key must be present.
pub fn parse_status(line: &str) -> Result<Status, Malformed> {
    let malformed = || Malformed(line.to_string());
    let mut fields: [Option<bool>; 6] = [None; 6];

    for pair in line.split_whitespace() {
        let (key, value) = pair.split_once('=').ok_or_else(malformed)?;
        let index = match key.to_lowercase().as_str() {
            "sel" => 0,
            "oe" => 1,
            "en0" => 2,
            "en1" => 3,
            "f0" => 4,
            "f1" => 5,
            _ => return Err(malformed()),
        };
        fields[index] = Some(parse_level(value).map_err(|_| malformed())?);
    }

    match fields {
        [Some(sel), Some(oe), Some(en0), Some(en1), Some(f0), Some(f1)] => Ok(Status {
            sel,
            oe,
            en0,
            en1,
            f0,
            f1,
        }),
        _ => Err(malformed()),
    }
}

fn digit(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_lines() {
        assert_eq!(build_set(Signal::En0, true), "EN0 1\r\n");
        assert_eq!(build_set(Signal::Sel, false), "SEL 0\r\n");
        assert_eq!(build_query(Signal::Oe), "OE?\r\n");
        assert_eq!(build_line("STATUS?"), "STATUS?\r\n");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("1"), Ok(true));
        assert_eq!(parse_level("0\r\n"), Ok(false));
        assert!(parse_level("2").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn test_parse_fault() {
        assert_eq!(parse_fault("0 1"), Ok((false, true)));
        assert_eq!(parse_fault("1 0\r\n"), Ok((true, false)));
        assert!(parse_fault("1").is_err());
        assert!(parse_fault("0 0 0").is_err());
    }

    #[test]
    fn test_parse_status() {
        let status = parse_status("SEL=0 OE=1 EN0=1 EN1=0 F0=0 F1=1").unwrap();
        assert_eq!(
            status,
            Status {
                sel: false,
                oe: true,
                en0: true,
                en1: false,
                f0: false,
                f1: true,
            }
        );
        assert_eq!(status.to_string(), "SEL=0 OE=1 EN0=1 EN1=0 F0=0 F1=1");
    }

    #[test]
    fn test_parse_status_rejects_partial() {
        assert!(parse_status("SEL=0 OE=1").is_err());
        assert!(parse_status("SEL=0 OE=1 EN0=1 EN1=0 F0=0 F1=2").is_err());
        assert!(parse_status("SEL0 OE=1 EN0=1 EN1=0 F0=0 F1=1").is_err());
        assert!(parse_status("").is_err());
    }
}
