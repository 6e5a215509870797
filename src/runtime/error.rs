// Mon Feb 16 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Missing required runtime exports: {}", .0.join(", "))]
    MissingExports(Vec<String>),
    #[error("Failed to attach thread to runtime: {0}")]
    AttachFailed(String),
    #[error("Failed to read host binary {path}: {source}")]
    HostUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse host binary: {0}")]
    HostUnparsable(String),
    #[error("Unsupported host binary format: {0}")]
    UnsupportedFormat(String),
}

impl From<goblin::error::Error> for BindingError {
    fn from(err: goblin::error::Error) -> Self {
        BindingError::HostUnparsable(err.to_string())
    }
}
