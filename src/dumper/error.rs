// Mon Feb 16 2026 - Alex

use crate::config::ConfigError;
use crate::mapping::MappingError;
use crate::memory::MemoryError;
use crate::metadata::MetadataError;
use crate::output::OutputError;
use crate::runtime::BindingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] MemoryError),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
