// Mon Feb 16 2026 - Alex

use crate::mapping::{MappingError, NameMapping};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Type,
    Field,
    Property,
    Method,
    Other(i64),
}

impl From<i64> for SymbolKind {
    fn from(raw: i64) -> Self {
        match raw {
            0 => SymbolKind::Type,
            1 => SymbolKind::Field,
            2 => SymbolKind::Property,
            3 => SymbolKind::Method,
            other => SymbolKind::Other(other),
        }
    }
}

/// One record of the mapping side file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MappingEntry {
    pub obfuscated_name: Option<String>,
    pub friendly_name: Option<String>,
    pub symbol_type: Option<i64>,
    pub parent_type: Option<String>,
}

impl MappingEntry {
    pub fn kind(&self) -> SymbolKind {
        SymbolKind::from(self.symbol_type.unwrap_or(-1))
    }
}

pub fn parse_entries(entries: &[MappingEntry]) -> NameMapping {
    let mut mapping = NameMapping::new();
    for entry in entries {
        let raw = entry.obfuscated_name.as_deref().unwrap_or("");
        let friendly = entry.friendly_name.as_deref().unwrap_or("");
        if raw.is_empty() || friendly.is_empty() {
            continue;
        }
        match entry.kind() {
            SymbolKind::Type => mapping.insert_type(raw, friendly),
            _ => mapping.insert_member(entry.parent_type.as_deref().unwrap_or(""), raw, friendly),
        }
    }
    mapping
}

pub fn load_mapping(path: &Path) -> Result<NameMapping, MappingError> {
    let json = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<MappingEntry> = serde_json::from_str(&json).map_err(|source| MappingError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = parse_entries(&entries);
    log::info!(
        "Loaded {} type and {} member mappings from {}",
        mapping.type_count(),
        mapping.member_count(),
        path.display()
    );
    Ok(mapping)
}

/// A missing or broken file degrades to an empty mapping with a warning.
pub fn load_mapping_or_empty(path: &Path) -> NameMapping {
    if !path.exists() {
        log::warn!("Mapping file {} not found, using raw names", path.display());
        return NameMapping::new();
    }
    match load_mapping(path) {
        Ok(mapping) => mapping,
        Err(e) => {
            log::warn!("{}; using raw names", e);
            NameMapping::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"ObfuscatedName": "QWERTYUIOPA", "FriendlyName": "PlayerController", "SymbolType": 0, "ParentType": null},
        {"ObfuscatedName": "ASDFGHJKLZX", "FriendlyName": "Jump", "SymbolType": 3, "ParentType": "QWERTYUIOPA"},
        {"ObfuscatedName": "ZXCVBNMQWER", "FriendlyName": "speed", "SymbolType": 1},
        {"ObfuscatedName": "", "FriendlyName": "Ignored", "SymbolType": 0},
        {"ObfuscatedName": "NOFRIENDLYX", "SymbolType": 0}
    ]"#;

    #[test]
    fn test_parse_sample() {
        let entries: Vec<MappingEntry> = serde_json::from_str(SAMPLE).unwrap();
        let mapping = parse_entries(&entries);
        assert_eq!(mapping.type_count(), 1);
        assert_eq!(mapping.member_count(), 2);
        assert_eq!(mapping.resolve_type("QWERTYUIOPA"), Some("PlayerController"));
        assert_eq!(mapping.resolve_member("QWERTYUIOPA", "ASDFGHJKLZX"), Some("Jump"));
        assert_eq!(mapping.resolve_member("Anything", "ZXCVBNMQWER"), Some("speed"));
        assert_eq!(mapping.resolve_type("NOFRIENDLYX"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let mapping = load_mapping(file.path()).unwrap();
        assert_eq!(mapping.len(), 3);
    }

    #[test]
    fn test_missing_and_malformed_files_degrade() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("mappings.json");
        assert!(load_mapping_or_empty(&missing).is_empty());

        std::fs::write(&missing, "{ not json").unwrap();
        assert!(matches!(load_mapping(&missing), Err(MappingError::Parse { .. })));
        assert!(load_mapping_or_empty(&missing).is_empty());
    }
}
