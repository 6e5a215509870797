// Mon Feb 16 2026 - Alex

pub mod pattern;

pub use pattern::Pattern;
