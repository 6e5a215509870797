// Mon Feb 16 2026 - Alex

pub mod error;
pub mod filter;
pub mod freshness;
pub mod raw_dump;
pub mod synthesizer;
pub mod unit;
pub mod writer;

pub use error::OutputError;
pub use filter::EmitFilter;
pub use freshness::{is_dump_fresh, is_fresh};
pub use raw_dump::render_listing;
pub use synthesizer::{InteropSynthesizer, Synthesis, SynthesisStats, ROOT_WRAPPER};
pub use unit::{unit_file_name, using_block, SourceUnit};
pub use writer::UnitWriter;
