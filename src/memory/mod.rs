// Mon Feb 16 2026 - Alex

pub mod address;
pub mod error;
pub mod layout;
pub mod probe;

pub use address::Address;
pub use error::MemoryError;
pub use layout::{LayoutReader, LayoutVersion, RuntimeLayout};
pub use probe::{BufferProbe, MemoryProbe, NullProbe, ProcessProbe};
