// Mon Feb 16 2026 - Alex

pub mod error;
pub mod loader;
pub mod store;

pub use error::MappingError;
pub use loader::{load_mapping, load_mapping_or_empty, MappingEntry, SymbolKind};
pub use store::NameMapping;
