//! Command dispatch and the byte-stream command engine

pub mod engine;
pub mod handler;

pub use engine::CommandEngine;
pub use handler::CommandDispatcher;
