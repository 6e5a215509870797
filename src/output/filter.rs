// Mon Feb 16 2026 - Alex

use crate::classifier::Classification;
use crate::mapping::NameMapping;
use crate::metadata::registry::strip_arity;
use crate::metadata::{KnownTypeRegistry, MetadataSnapshot, RuntimeType};
use crate::resolver::{effective_namespace, recover_namespace, sanitize_identifier, NamespacePolicy};

/// Decides which enumerated types get a declaration.
pub struct EmitFilter<'a> {
    policy: &'a NamespacePolicy,
    classification: &'a Classification,
    mapping: &'a NameMapping,
}

impl<'a> EmitFilter<'a> {
    pub fn new(policy: &'a NamespacePolicy, classification: &'a Classification, mapping: &'a NameMapping) -> Self {
        Self {
            policy,
            classification,
            mapping,
        }
    }

    pub fn accepts(&self, snapshot: &MetadataSnapshot, ty: &RuntimeType) -> bool {
        if ty.name.contains(['<', '>', '/']) {
            return false;
        }
        if !ty.flags.is_publicly_visible() {
            return false;
        }
        let namespace = recover_namespace(&snapshot.classes, ty.handle);
        if self.policy.is_skipped(&namespace) {
            return false;
        }
        if self.classification.is_entirely_fake_class(ty.handle) {
            return false;
        }
        self.mapping.resolve_type(&ty.name).and_then(sanitize_identifier).is_some()
            || sanitize_identifier(strip_arity(&ty.name)).is_some()
    }

    pub fn emittable<'s>(&'s self, snapshot: &'s MetadataSnapshot) -> impl Iterator<Item = &'s RuntimeType> + 's {
        snapshot.types.iter().filter(move |ty| self.accepts(snapshot, ty))
    }

    /// Registers every emittable type under the namespace it will be declared in.
    /// Must run before any reference is resolved.
    pub fn build_registry(&self, snapshot: &MetadataSnapshot) -> KnownTypeRegistry {
        let mut registry = KnownTypeRegistry::new();
        for ty in self.emittable(snapshot) {
            let namespace = recover_namespace(&snapshot.classes, ty.handle);
            registry.insert(effective_namespace(&namespace), &ty.name);
        }
        log::info!("Registered {} emittable types", registry.len());
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierConfig, MethodClassifier};
    use crate::metadata::MetadataEnumerator;
    use crate::runtime::fake::FakeRuntime;
    use crate::runtime::{MethodAttributes, TypeAttributes};

    fn public(runtime: &mut FakeRuntime, class: crate::runtime::TypeHandle) {
        runtime.set_class_flags(class, TypeAttributes::PUBLIC);
    }

    #[test]
    fn test_filter_rules() {
        let mut runtime = FakeRuntime::new();
        let image = runtime.add_image("Assembly-CSharp.dll");
        let player = runtime.add_class(image, "Game", "Player");
        public(&mut runtime, player);
        let hidden = runtime.add_class(image, "Game", "Hidden");
        runtime.set_class_flags(hidden, TypeAttributes::empty());
        let generated = runtime.add_class(image, "Game", "<>c__DisplayClass");
        public(&mut runtime, generated);
        let system = runtime.add_class(image, "System.Linq", "Enumerable");
        public(&mut runtime, system);
        let nested = runtime.add_class(image, "", "Inner");
        runtime.set_class_flags(nested, TypeAttributes::NESTED_PUBLIC);
        runtime.set_declaring(nested, player);
        let junk = runtime.add_class(image, "Game", "QWERTYUIOPA");
        public(&mut runtime, junk);
        for name in ["AAAAAAAAAAA", "BBBBBBBBBBB"] {
            runtime.add_method(junk, name, MethodAttributes::PUBLIC, 0x5000);
        }

        let snapshot = MetadataEnumerator::new(&runtime).enumerate();
        let classification = MethodClassifier::new(ClassifierConfig::new().with_threshold(2)).classify(&snapshot);
        let policy = NamespacePolicy::default();
        let mapping = NameMapping::new();
        let filter = EmitFilter::new(&policy, &classification, &mapping);

        let names: Vec<&str> = filter.emittable(&snapshot).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Player", "Inner"]);

        let registry = filter.build_registry(&snapshot);
        assert!(registry.contains("Game", "Player"));
        assert!(registry.contains("Game", "Inner"));
        assert!(!registry.contains("Global", "Inner"));
        assert!(!registry.contains("Game", "QWERTYUIOPA"));
        assert_eq!(registry.len(), 2);
    }
}
