// Mon Feb 16 2026 - Alex

pub mod error;
pub mod result;
pub mod session;

pub use error::DumpError;
pub use result::DumpResult;
pub use session::DumpSession;
