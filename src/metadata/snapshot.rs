// Mon Feb 16 2026 - Alex

use crate::metadata::{ImageInfo, MetadataError, RuntimeType};
use crate::runtime::TypeHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name and nesting link of any class seen during enumeration, including
/// classes that are only referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassName {
    pub name: String,
    pub namespace: String,
    pub declaring: Option<TypeHandle>,
}

/// Result of one enumeration pass. Immutable once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub assembly_count: usize,
    pub images: Vec<ImageInfo>,
    /// Every enumerated type in discovery order, deduplicated by handle.
    pub types: Vec<RuntimeType>,
    pub classes: IndexMap<TypeHandle, ClassName>,
    /// Types dropped because the runtime could not name them.
    pub unnamed_types: usize,
}

impl MetadataSnapshot {
    pub fn image_name(&self, index: usize) -> &str {
        self.images.get(index).map(|i| i.name.as_str()).unwrap_or("")
    }

    pub fn class_name(&self, handle: TypeHandle) -> Option<&ClassName> {
        self.classes.get(&handle)
    }

    pub fn find_type(&self, handle: TypeHandle) -> Option<&RuntimeType> {
        self.types.iter().find(|t| t.handle == handle)
    }

    pub fn method_count(&self) -> usize {
        self.types.iter().map(|t| t.methods.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let json = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), MetadataError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
