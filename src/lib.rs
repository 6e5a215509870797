// Mon Feb 16 2026 - Alex

pub mod classifier;
pub mod config;
pub mod dumper;
pub mod mapping;
pub mod memory;
pub mod metadata;
pub mod output;
pub mod pattern;
pub mod resolver;
pub mod runtime;
pub mod ui;
pub mod utils;

pub use classifier::{Classification, MethodClassifier};
pub use config::DumperConfig;
pub use dumper::{DumpError, DumpResult, DumpSession};
pub use mapping::NameMapping;
pub use metadata::{MetadataEnumerator, MetadataSnapshot};
pub use output::InteropSynthesizer;
pub use resolver::TypeResolver;
pub use runtime::RuntimeApi;
