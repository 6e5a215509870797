// Mon Feb 16 2026 - Alex

use ahash::AHashMap;

/// Friendly names for obfuscated identifiers. Read-only once loaded; an empty
/// mapping makes every lookup miss.
#[derive(Debug, Clone, Default)]
pub struct NameMapping {
    types: AHashMap<String, String>,
    members: AHashMap<String, String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    fn member_key(owner: &str, member: &str) -> String {
        format!("{}::{}", owner, member)
    }

    pub fn insert_type(&mut self, raw: &str, friendly: &str) {
        self.types.insert(raw.to_string(), friendly.to_string());
    }

    /// An empty `owner` registers the member for every owner.
    pub fn insert_member(&mut self, owner: &str, raw: &str, friendly: &str) {
        let key = if owner.is_empty() { raw.to_string() } else { Self::member_key(owner, raw) };
        self.members.insert(key, friendly.to_string());
    }

    pub fn resolve_type(&self, raw: &str) -> Option<&str> {
        self.types.get(raw).map(String::as_str)
    }

    /// Tries `owner::member` first, then an owner-less entry for the member.
    pub fn resolve_member(&self, owner: &str, raw: &str) -> Option<&str> {
        if !owner.is_empty() {
            if let Some(name) = self.members.get(&Self::member_key(owner, raw)) {
                return Some(name);
            }
        }
        self.members.get(raw).map(String::as_str)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_lookup_prefers_owner() {
        let mut mapping = NameMapping::new();
        mapping.insert_member("PLAYERXQWER", "ABCDEFGHIJK", "Jump");
        mapping.insert_member("", "ABCDEFGHIJK", "Generic");

        assert_eq!(mapping.resolve_member("PLAYERXQWER", "ABCDEFGHIJK"), Some("Jump"));
        assert_eq!(mapping.resolve_member("OTHERCLASSX", "ABCDEFGHIJK"), Some("Generic"));
        assert_eq!(mapping.resolve_member("", "ABCDEFGHIJK"), Some("Generic"));
        assert_eq!(mapping.resolve_member("PLAYERXQWER", "Missing"), None);
    }

    #[test]
    fn test_empty_mapping_misses() {
        let mapping = NameMapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.resolve_type("Anything"), None);
    }
}
