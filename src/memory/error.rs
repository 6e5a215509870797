// Mon Feb 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Read failed at address 0x{0:x}")]
    ReadFailed(u64),
    #[error("Short read at address 0x{address:x}: wanted {wanted} bytes, got {got}")]
    ShortRead { address: u64, wanted: usize, got: usize },
    #[error("Layout {layout}: field `{field}` at 0x{offset:x} (+{size}) exceeds structure size 0x{limit:x}")]
    FieldOutOfBounds {
        layout: String,
        field: &'static str,
        offset: usize,
        size: usize,
        limit: usize,
    },
    #[error("Layout {layout}: field `{field}` at 0x{offset:x} is not aligned to {alignment}")]
    FieldMisaligned {
        layout: String,
        field: &'static str,
        offset: usize,
        alignment: usize,
    },
    #[error("Layout {layout}: fields `{first}` and `{second}` overlap")]
    FieldOverlap {
        layout: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("Not supported: {0}")]
    NotSupported(String),
}
