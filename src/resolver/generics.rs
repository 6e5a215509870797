// Mon Feb 16 2026 - Alex

/// How a well-known generic type is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericMapping {
    /// `Name<args>` with the arguments resolved.
    Parameterized(&'static str),
    /// A non-generic name, dropping the arguments.
    Bare(&'static str),
    /// Not representable; becomes the placeholder.
    Erased,
}

struct KnownGeneric {
    namespace: &'static str,
    name: &'static str,
    /// `None` matches any arity.
    arity: Option<usize>,
    mapping: GenericMapping,
}

const fn entry(namespace: &'static str, name: &'static str, arity: Option<usize>, mapping: GenericMapping) -> KnownGeneric {
    KnownGeneric { namespace, name, arity, mapping }
}

const COLLECTIONS: &str = "System.Collections.Generic";

// Printed names are fully qualified so a declaration of the same short name
// in the unit's namespace cannot capture them.
static KNOWN_GENERICS: &[KnownGeneric] = &[
    entry(COLLECTIONS, "List", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.List")),
    entry(COLLECTIONS, "Dictionary", Some(2), GenericMapping::Parameterized("global::System.Collections.Generic.Dictionary")),
    entry(COLLECTIONS, "IList", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.IList")),
    entry(COLLECTIONS, "IEnumerable", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.IEnumerable")),
    entry(COLLECTIONS, "ICollection", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.ICollection")),
    entry(COLLECTIONS, "IDictionary", Some(2), GenericMapping::Parameterized("global::System.Collections.Generic.IDictionary")),
    entry(COLLECTIONS, "IReadOnlyList", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.IReadOnlyList")),
    entry(
        COLLECTIONS,
        "IReadOnlyCollection",
        Some(1),
        GenericMapping::Parameterized("global::System.Collections.Generic.IReadOnlyCollection"),
    ),
    entry(COLLECTIONS, "IEnumerator", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.IEnumerator")),
    entry(COLLECTIONS, "KeyValuePair", Some(2), GenericMapping::Parameterized("global::System.Collections.Generic.KeyValuePair")),
    entry(COLLECTIONS, "HashSet", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.HashSet")),
    entry(COLLECTIONS, "Queue", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.Queue")),
    entry(COLLECTIONS, "Stack", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.Stack")),
    entry(COLLECTIONS, "LinkedList", Some(1), GenericMapping::Parameterized("global::System.Collections.Generic.LinkedList")),
    entry("System.Threading.Tasks", "Task", Some(1), GenericMapping::Parameterized("global::System.Threading.Tasks.Task")),
    entry("System", "Nullable", Some(1), GenericMapping::Erased),
    entry("System", "Action", None, GenericMapping::Bare("global::System.Action")),
    entry("System", "Func", None, GenericMapping::Erased),
    entry("System", "Tuple", None, GenericMapping::Erased),
    entry("System", "ValueTuple", None, GenericMapping::Erased),
    entry("Cysharp.Threading.Tasks", "UniTask", Some(1), GenericMapping::Erased),
];

/// Looks up a generic by namespace, arity-stripped name and arity.
pub fn known_generic(namespace: &str, name: &str, arity: usize) -> Option<GenericMapping> {
    KNOWN_GENERICS
        .iter()
        .find(|g| g.namespace == namespace && g.name == name && g.arity.map_or(true, |a| a == arity))
        .map(|g| g.mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_generics() {
        assert_eq!(
            known_generic(COLLECTIONS, "List", 1),
            Some(GenericMapping::Parameterized("global::System.Collections.Generic.List"))
        );
        assert_eq!(known_generic(COLLECTIONS, "List", 2), None);
        assert_eq!(known_generic("System", "Action", 3), Some(GenericMapping::Bare("global::System.Action")));
        assert_eq!(known_generic("System", "Func", 2), Some(GenericMapping::Erased));
        assert_eq!(known_generic("Game", "List", 1), None);
    }
}
