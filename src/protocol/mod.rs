pub mod framing;

pub use framing::{Line, LineAccumulator};
