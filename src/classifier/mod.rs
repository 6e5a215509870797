// Mon Feb 16 2026 - Alex

pub mod config;
pub mod detector;
pub mod index;
pub mod naming;
pub mod report;
pub mod stub_pattern;
pub mod verdict;

pub use config::ClassifierConfig;
pub use detector::{Classification, MethodClassifier};
pub use index::PointerShareIndex;
pub use naming::{is_obfuscated_name, raw_signature};
pub use report::FakeMethodReport;
pub use stub_pattern::{StubIdiom, StubInspection, StubMatcher};
pub use verdict::{ClassAnalysis, FakeMethod, FakeReason, Verdict};
