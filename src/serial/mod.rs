pub mod channel;
pub mod traits;

pub use channel::SerialChannel;
pub use traits::{LinkError, PacketLink};
