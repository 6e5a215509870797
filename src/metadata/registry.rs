// Mon Feb 16 2026 - Alex

use ahash::AHashSet;

/// Canonical `Namespace.Name` of every type the synthesizer will declare.
///
/// Names are stored with the arity suffix stripped and with the namespace the
/// type is emitted under, so nested types are registered under their
/// recovered namespace.
#[derive(Debug, Clone, Default)]
pub struct KnownTypeRegistry {
    names: AHashSet<String>,
}

impl KnownTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canonical(namespace: &str, name: &str) -> String {
        let name = strip_arity(name);
        if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", namespace, name)
        }
    }

    pub fn insert(&mut self, namespace: &str, name: &str) -> bool {
        self.names.insert(Self::canonical(namespace, name))
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.names.contains(&Self::canonical(namespace, name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for KnownTypeRegistry {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (namespace, name) in iter {
            registry.insert(namespace, name);
        }
        registry
    }
}

/// ``Dictionary`2`` becomes `Dictionary`.
pub fn strip_arity(name: &str) -> &str {
    match name.find('`') {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Arity encoded after the backtick, if the suffix parses.
pub fn encoded_arity(name: &str) -> Option<usize> {
    let pos = name.find('`')?;
    let digits: String = name[pos + 1..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
