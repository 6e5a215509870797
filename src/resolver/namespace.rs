// Mon Feb 16 2026 - Alex

use crate::metadata::ClassName;
use crate::runtime::TypeHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bucket for types that have no namespace of their own or inherited.
pub const GLOBAL_NAMESPACE: &str = "Global";

pub const MAX_NAMESPACE_WALK: usize = 16;

/// Which namespaces are declared, which are referenced as framework types,
/// and which are erased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespacePolicy {
    /// Namespaces whose types are never declared.
    pub skip_namespaces: Vec<String>,
    /// Prefixes whose namespaces are never declared, e.g. `System.`.
    pub skip_prefixes: Vec<String>,
    /// Skipped namespaces the generated code can still reference directly.
    pub available_namespaces: Vec<String>,
}

impl Default for NamespacePolicy {
    fn default() -> Self {
        let skip = [
            "System", "System.Collections", "System.Collections.Generic", "System.IO", "System.Text",
            "System.Threading", "System.Threading.Tasks", "System.Linq", "System.Reflection",
            "System.Runtime", "System.Runtime.CompilerServices", "System.Runtime.InteropServices",
            "System.Diagnostics", "System.Globalization", "System.Security", "System.ComponentModel",
            "System.Net", "System.Xml", "Mono", "mscorlib", "Internal", "Microsoft",
            "UnityEngine.Internal", "UnityEngineInternal",
        ];
        let available = [
            "System", "System.Collections", "System.Collections.Generic", "System.IO", "System.Text",
            "System.Threading", "System.Threading.Tasks", "Cysharp.Threading.Tasks",
        ];
        Self {
            skip_namespaces: skip.iter().map(|s| s.to_string()).collect(),
            skip_prefixes: ["System.", "Mono.", "Internal.", "Microsoft."].iter().map(|s| s.to_string()).collect(),
            available_namespaces: available.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NamespacePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_skip(mut self, namespaces: &[&str]) -> Self {
        self.skip_namespaces.extend(namespaces.iter().map(|s| s.to_string()));
        self
    }

    /// Types in these namespaces are not declared.
    pub fn is_skipped(&self, namespace: &str) -> bool {
        self.skip_namespaces.iter().any(|s| s == namespace)
            || self.skip_prefixes.iter().any(|p| namespace.starts_with(p.as_str()))
    }

    pub fn is_available(&self, namespace: &str) -> bool {
        self.available_namespaces.iter().any(|s| s == namespace)
    }

    /// Skipped and not available: references collapse to the placeholder.
    pub fn is_erased(&self, namespace: &str) -> bool {
        self.is_skipped(namespace) && !self.is_available(namespace)
    }
}

/// Namespace of `class`, taken from the nearest declaring ancestor when the
/// class has none. Empty when nothing in the bounded walk has one.
pub fn recover_namespace(classes: &IndexMap<TypeHandle, ClassName>, class: TypeHandle) -> String {
    let mut current = Some(class);
    let mut depth = 0;
    while let Some(handle) = current {
        if depth > MAX_NAMESPACE_WALK {
            break;
        }
        let Some(entry) = classes.get(&handle) else {
            break;
        };
        if !entry.namespace.is_empty() {
            return entry.namespace.clone();
        }
        current = entry.declaring;
        depth += 1;
    }
    String::new()
}

pub fn effective_namespace(namespace: &str) -> &str {
    if namespace.is_empty() {
        GLOBAL_NAMESPACE
    } else {
        namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, namespace: &str, declaring: Option<u64>) -> ClassName {
        ClassName {
            name: name.to_string(),
            namespace: namespace.to_string(),
            declaring: declaring.map(TypeHandle::new),
        }
    }

    #[test]
    fn test_policy() {
        let policy = NamespacePolicy::default();
        assert!(policy.is_skipped("System"));
        assert!(policy.is_skipped("System.Runtime.Serialization"));
        assert!(policy.is_skipped("Mono.Security"));
        assert!(!policy.is_skipped("UnityEngine"));
        assert!(!policy.is_skipped("Systematic"));
        assert!(policy.is_erased("System.Runtime.CompilerServices"));
        assert!(!policy.is_erased("System.Collections.Generic"));
        assert!(!policy.is_erased("Game"));
        assert!(policy.clone().with_extra_skip(&["Game.Debug"]).is_skipped("Game.Debug"));
    }

    #[test]
    fn test_recover_namespace_from_ancestor() {
        let mut classes = IndexMap::new();
        classes.insert(TypeHandle::new(1), class("Outer", "Game", None));
        classes.insert(TypeHandle::new(2), class("Middle", "", Some(1)));
        classes.insert(TypeHandle::new(3), class("Inner", "", Some(2)));
        classes.insert(TypeHandle::new(4), class("Lonely", "", None));

        assert_eq!(recover_namespace(&classes, TypeHandle::new(3)), "Game");
        assert_eq!(recover_namespace(&classes, TypeHandle::new(1)), "Game");
        assert_eq!(recover_namespace(&classes, TypeHandle::new(4)), "");
        assert_eq!(effective_namespace(&recover_namespace(&classes, TypeHandle::new(4))), GLOBAL_NAMESPACE);
    }

    #[test]
    fn test_recover_namespace_terminates_on_cycle() {
        let mut classes = IndexMap::new();
        classes.insert(TypeHandle::new(1), class("A", "", Some(2)));
        classes.insert(TypeHandle::new(2), class("B", "", Some(1)));
        assert_eq!(recover_namespace(&classes, TypeHandle::new(1)), "");
    }
}
