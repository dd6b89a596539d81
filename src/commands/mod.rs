pub mod parser;
pub mod serialiser;
pub mod types;

pub use parser::CommandParser;
pub use serialiser::{ResponseLine, ResponseSerialiser};
pub use types::{Command, ParseError, Response, Signal};
