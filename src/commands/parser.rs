//! Command parser for framed command lines
//!
//! Matches a trimmed line against the fixed command table.

use crate::commands::types::{Command, ParseError, Signal};
use crate::config::protocol::{CR, LF, SPACE};

/// Parser for the ASCII command grammar
pub struct CommandParser;

impl CommandParser {
    /// Create a new command parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a command line (terminator already removed)
    ///
    /// The command is matched on the trimmed line, exact and case-sensitive.
    /// A set argument is read from the untrimmed line: a lone `0` or `1`
    /// with nothing after it but a line terminator.
    pub fn parse(&self, line: &[u8]) -> Result<Command, ParseError> {
        let trimmed = trim_trailing(line);
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        match trimmed {
            b"STATUS?" => return Ok(Command::Status),
            b"FAULT?" => return Ok(Command::Fault),
            _ => {}
        }

        for signal in Signal::ALL {
            let keyword = signal.keyword().as_bytes();
            let Some(rest) = trimmed.strip_prefix(keyword) else {
                continue;
            };

            match rest {
                b"?" => return Ok(Command::Query(signal)),
                [SPACE, _] => {
                    let arg = &line[keyword.len() + 1..];
                    return parse_bool_arg(arg)
                        .map(|level| Command::Set(signal, level))
                        .ok_or(ParseError::InvalidArgument);
                }
                _ => {}
            }
        }

        Err(ParseError::UnknownCommand)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip trailing CR, LF and space characters
pub fn trim_trailing(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| b != CR && b != LF && b != SPACE)
        .map_or(0, |i| i + 1);
    &line[..end]
}

/// Parse a boolean argument
///
/// Accepts `0` or `1` followed by end of input or a line terminator.
pub fn parse_bool_arg(arg: &[u8]) -> Option<bool> {
    let level = match arg.first()? {
        b'0' => false,
        b'1' => true,
        _ => return None,
    };

    match arg.get(1) {
        None | Some(&CR) | Some(&LF) => Some(level),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_queries() {
        let parser = CommandParser::new();

        assert_eq!(parser.parse(b"STATUS?"), Ok(Command::Status));
        assert_eq!(parser.parse(b"FAULT?"), Ok(Command::Fault));
        assert_eq!(parser.parse(b"SEL?"), Ok(Command::Query(Signal::MuxSelect)));
        assert_eq!(parser.parse(b"OE?"), Ok(Command::Query(Signal::MuxOutputEnable)));
        assert_eq!(parser.parse(b"EN0?"), Ok(Command::Query(Signal::Channel0)));
        assert_eq!(parser.parse(b"EN1?"), Ok(Command::Query(Signal::Channel1)));
    }

    #[test]
    fn test_parse_sets() {
        let parser = CommandParser::new();

        assert_eq!(parser.parse(b"SEL 1"), Ok(Command::Set(Signal::MuxSelect, true)));
        assert_eq!(parser.parse(b"SEL 0"), Ok(Command::Set(Signal::MuxSelect, false)));
        assert_eq!(parser.parse(b"OE 1"), Ok(Command::Set(Signal::MuxOutputEnable, true)));
        assert_eq!(parser.parse(b"EN0 1"), Ok(Command::Set(Signal::Channel0, true)));
        assert_eq!(parser.parse(b"EN1 0"), Ok(Command::Set(Signal::Channel1, false)));
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let parser = CommandParser::new();

        assert_eq!(parser.parse(b"STATUS?  "), Ok(Command::Status));
        assert_eq!(parser.parse(b"SEL?  "), Ok(Command::Query(Signal::MuxSelect)));
        assert_eq!(parser.parse(b"   "), Err(ParseError::Empty));
        assert_eq!(parser.parse(b""), Err(ParseError::Empty));
    }

    #[test]
    fn test_set_argument_ends_at_digit() {
        let parser = CommandParser::new();

        assert_eq!(parser.parse(b"EN1 1\r"), Ok(Command::Set(Signal::Channel1, true)));
        assert_eq!(parser.parse(b"EN1 0\n"), Ok(Command::Set(Signal::Channel1, false)));
        assert_eq!(parser.parse(b"EN1 1\r\n"), Ok(Command::Set(Signal::Channel1, true)));
        assert_eq!(parser.parse(b"SEL 1 "), Err(ParseError::InvalidArgument));
        assert_eq!(parser.parse(b"EN1 1 \r\n"), Err(ParseError::InvalidArgument));
        assert_eq!(parser.parse(b"OE 0\t"), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn test_invalid_arguments() {
        let parser = CommandParser::new();

        assert_eq!(parser.parse(b"SEL 2"), Err(ParseError::InvalidArgument));
        assert_eq!(parser.parse(b"OE x"), Err(ParseError::InvalidArgument));
        assert_eq!(parser.parse(b"EN0 ?"), Err(ParseError::InvalidArgument));
    }

    #[test]
    fn test_unknown_commands() {
        let parser = CommandParser::new();

        assert_eq!(parser.parse(b"SEL"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"SEL "), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"sel 1"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"SELECT"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"SEL 10"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"SEL  1"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b" SEL?"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"status?"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"STATUS"), Err(ParseError::UnknownCommand));
        assert_eq!(parser.parse(b"EN2?"), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn test_parse_bool_arg() {
        assert_eq!(parse_bool_arg(b"0"), Some(false));
        assert_eq!(parse_bool_arg(b"1"), Some(true));
        assert_eq!(parse_bool_arg(b"1\r"), Some(true));
        assert_eq!(parse_bool_arg(b"0\n"), Some(false));
        assert_eq!(parse_bool_arg(b"01"), None);
        assert_eq!(parse_bool_arg(b"2"), None);
        assert_eq!(parse_bool_arg(b""), None);
    }
}
