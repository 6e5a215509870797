// Mon Feb 16 2026 - Alex

use serde::{Deserialize, Serialize};

pub const DEFAULT_SHARING_THRESHOLD: usize = 10;

/// Image-name prefixes whose methods are never suspected.
pub const DEFAULT_EXEMPT_PREFIXES: &[&str] = &[
    "UnityEngine",
    "Unity.",
    "System",
    "mscorlib",
    "Mono.",
    "netstandard",
    "Newtonsoft",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Sharers needed before a code address counts as a stub.
    pub pointer_sharing_threshold: usize,
    /// Bytes read at each stub address for the report.
    pub max_stub_body_size: usize,
    pub check_stub_patterns: bool,
    pub whitelist_vtable_methods: bool,
    pub exempt_prefixes: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pointer_sharing_threshold: DEFAULT_SHARING_THRESHOLD,
            max_stub_body_size: 16,
            check_stub_patterns: true,
            whitelist_vtable_methods: true,
            exempt_prefixes: DEFAULT_EXEMPT_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClassifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.pointer_sharing_threshold = threshold;
        self
    }

    pub fn with_exempt_prefixes(mut self, prefixes: &[&str]) -> Self {
        self.exempt_prefixes = prefixes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_vtable_whitelist(mut self, enabled: bool) -> Self {
        self.whitelist_vtable_methods = enabled;
        self
    }

    pub fn with_stub_patterns(mut self, enabled: bool) -> Self {
        self.check_stub_patterns = enabled;
        self
    }

    /// Empty image names are never exempt.
    pub fn is_exempt_image(&self, image_name: &str) -> bool {
        !image_name.is_empty() && self.exempt_prefixes.iter().any(|p| image_name.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_prefixes() {
        let config = ClassifierConfig::default();
        assert!(config.is_exempt_image("UnityEngine.CoreModule.dll"));
        assert!(config.is_exempt_image("Unity.Mathematics.dll"));
        assert!(config.is_exempt_image("System.Core.dll"));
        assert!(!config.is_exempt_image("Assembly-CSharp.dll"));
        assert!(!config.is_exempt_image("UnityX.dll"));
        assert!(!config.is_exempt_image(""));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClassifierConfig = serde_json::from_str(r#"{"pointer_sharing_threshold": 4}"#).unwrap();
        assert_eq!(config.pointer_sharing_threshold, 4);
        assert!(config.whitelist_vtable_methods);
        assert_eq!(config.exempt_prefixes.len(), DEFAULT_EXEMPT_PREFIXES.len());
    }
}
