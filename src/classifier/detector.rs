// Mon Feb 16 2026 - Alex

use crate::classifier::naming::{is_obfuscated_name, raw_signature};
use crate::classifier::{ClassAnalysis, ClassifierConfig, FakeMethod, FakeReason, PointerShareIndex, Verdict};
use crate::memory::Address;
use crate::metadata::{MetadataSnapshot, RuntimeMethod, RuntimeType};
use crate::runtime::{MethodHandle, TypeHandle};
use ahash::{AHashMap, AHashSet};

/// Separates genuine methods from injected noise over one snapshot.
pub struct MethodClassifier {
    config: ClassifierConfig,
}

/// Verdicts of one classifier run. Nothing in here changes after `classify` returns.
#[derive(Debug, Clone)]
pub struct Classification {
    config: ClassifierConfig,
    index: PointerShareIndex,
    stubs: AHashSet<Address>,
    vtable_methods: AHashSet<MethodHandle>,
    fake_methods: Vec<FakeMethod>,
    fake_lookup: AHashMap<MethodHandle, usize>,
    fake_classes: AHashSet<TypeHandle>,
    class_analysis: Vec<ClassAnalysis>,
    total_methods: usize,
    exempt_methods: usize,
    generic_skipped: usize,
}

impl MethodClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, snapshot: &MetadataSnapshot) -> Classification {
        let mut result = Classification {
            config: self.config.clone(),
            index: PointerShareIndex::new(),
            stubs: AHashSet::new(),
            vtable_methods: AHashSet::new(),
            fake_methods: Vec::new(),
            fake_lookup: AHashMap::new(),
            fake_classes: AHashSet::new(),
            class_analysis: Vec::new(),
            total_methods: 0,
            exempt_methods: 0,
            generic_skipped: 0,
        };

        self.collect_pointers(snapshot, &mut result);
        self.build_vtable_whitelist(snapshot, &mut result);
        self.classify_methods(snapshot, &mut result);

        log::info!(
            "Classified {} methods: {} fake, {} fake classes, {} stub addresses",
            result.total_methods,
            result.fake_methods.len(),
            result.fake_classes.len(),
            result.stubs.len()
        );
        result
    }

    fn collect_pointers(&self, snapshot: &MetadataSnapshot, result: &mut Classification) {
        for ty in &snapshot.types {
            let exempt = self.config.is_exempt_image(snapshot.image_name(ty.image));
            let generic = ty.is_generic();

            for method in &ty.methods {
                result.total_methods += 1;
                if exempt {
                    result.exempt_methods += 1;
                    continue;
                }
                if generic {
                    result.generic_skipped += 1;
                    continue;
                }
                if let Some(addr) = method.code_address {
                    result.index.record(addr, method.handle);
                }
            }
        }

        result.stubs = result
            .index
            .stub_addresses(self.config.pointer_sharing_threshold)
            .into_iter()
            .map(|(addr, _)| addr)
            .collect();
        log::debug!(
            "Pointer collection: {} distinct addresses, {} stubs, {} exempt, {} generic",
            result.index.len(),
            result.stubs.len(),
            result.exempt_methods,
            result.generic_skipped
        );
    }

    fn build_vtable_whitelist(&self, snapshot: &MetadataSnapshot, result: &mut Classification) {
        if !self.config.whitelist_vtable_methods {
            return;
        }
        result.vtable_methods = snapshot
            .types
            .iter()
            .flat_map(|t| t.methods.iter())
            .filter(|m| m.flags.is_virtual() || m.flags.is_abstract())
            .map(|m| m.handle)
            .collect();
    }

    fn classify_methods(&self, snapshot: &MetadataSnapshot, result: &mut Classification) {
        for ty in &snapshot.types {
            if self.config.is_exempt_image(snapshot.image_name(ty.image)) {
                continue;
            }

            let mut analysis = ClassAnalysis::new(ty.handle, ty.full_name());
            for method in &ty.methods {
                analysis.total_methods += 1;
                match self.judge(ty, method, result) {
                    Verdict::Real => analysis.real_methods += 1,
                    Verdict::Fake(reason) => {
                        analysis.fake_methods += 1;
                        result.fake_lookup.insert(method.handle, result.fake_methods.len());
                        result.fake_methods.push(FakeMethod {
                            method: method.handle,
                            owner: ty.handle,
                            class_name: analysis.full_name.clone(),
                            method_name: if method.name.is_empty() { "???".to_string() } else { method.name.clone() },
                            signature: raw_signature(snapshot, &analysis.full_name, method),
                            code_address: method.code_address,
                            reason,
                        });
                    }
                }
            }

            analysis.finish();
            if analysis.is_entirely_fake {
                result.fake_classes.insert(ty.handle);
            }
            if analysis.fake_methods > 0 {
                result.class_analysis.push(analysis);
            }
        }
    }

    /// First matching rule wins.
    fn judge(&self, owner: &RuntimeType, method: &RuntimeMethod, result: &Classification) -> Verdict {
        if result.vtable_methods.contains(&method.handle) {
            return Verdict::Real;
        }
        if method.is_constructor_like() {
            return Verdict::Real;
        }
        if owner.is_generic() {
            return Verdict::Real;
        }

        let obfuscated = is_obfuscated_name(&method.name);
        match method.code_address.and_then(Address::non_null) {
            None if obfuscated => Verdict::Fake(FakeReason::NullPointer),
            None => Verdict::Real,
            Some(addr) if result.stubs.contains(&addr) && obfuscated => {
                Verdict::Fake(FakeReason::SharedPointer(result.index.share_count(addr)))
            }
            Some(_) => Verdict::Real,
        }
    }
}

impl Default for MethodClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl Classification {
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn is_fake_method(&self, method: MethodHandle) -> bool {
        self.fake_lookup.contains_key(&method)
    }

    pub fn is_entirely_fake_class(&self, class: TypeHandle) -> bool {
        self.fake_classes.contains(&class)
    }

    pub fn verdict(&self, method: MethodHandle) -> Verdict {
        self.fake_lookup
            .get(&method)
            .and_then(|&i| self.fake_methods.get(i))
            .map(|f| Verdict::Fake(f.reason))
            .unwrap_or(Verdict::Real)
    }

    pub fn fake_methods(&self) -> &[FakeMethod] {
        &self.fake_methods
    }

    /// Only classes with at least one fake method are analysed here.
    pub fn class_analysis(&self) -> &[ClassAnalysis] {
        &self.class_analysis
    }

    pub fn index(&self) -> &PointerShareIndex {
        &self.index
    }

    pub fn is_stub_address(&self, address: Address) -> bool {
        self.stubs.contains(&address)
    }

    /// Stub addresses with their sharer counts, most shared first.
    pub fn stub_addresses(&self) -> Vec<(Address, usize)> {
        self.index.stub_addresses(self.config.pointer_sharing_threshold)
    }

    pub fn total_methods(&self) -> usize {
        self.total_methods
    }

    pub fn exempt_methods(&self) -> usize {
        self.exempt_methods
    }

    pub fn generic_skipped(&self) -> usize {
        self.generic_skipped
    }

    pub fn fake_method_count(&self) -> usize {
        self.fake_methods.len()
    }

    pub fn fake_class_count(&self) -> usize {
        self.fake_classes.len()
    }

    pub fn vtable_method_count(&self) -> usize {
        self.vtable_methods.len()
    }

    pub fn stub_count(&self) -> usize {
        self.stubs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataEnumerator;
    use crate::runtime::fake::FakeRuntime;
    use crate::runtime::{ImageHandle, MethodAttributes};

    const STUB: u64 = 0x1000;
    const NOISE: [&str; 10] = [
        "AAAAAAAAAAA", "BBBBBBBBBBB", "CCCCCCCCCCC", "DDDDDDDDDDD", "EEEEEEEEEEE",
        "FFFFFFFFFFF", "GGGGGGGGGGG", "HHHHHHHHHHH", "IIIIIIIIIII", "JJJJJJJJJJJ",
    ];

    fn public() -> MethodAttributes {
        MethodAttributes::PUBLIC
    }

    fn classify(rt: &FakeRuntime) -> (MetadataSnapshot, Classification) {
        let snapshot = MetadataEnumerator::new(rt).enumerate();
        let classification = MethodClassifier::default().classify(&snapshot);
        (snapshot, classification)
    }

    /// Game image with `PLAYERXQWER` holding four noise methods and a ctor;
    /// six more noise methods elsewhere share the same stub.
    fn player_scenario() -> (FakeRuntime, ImageHandle, TypeHandle, Vec<MethodHandle>) {
        let mut rt = FakeRuntime::new();
        let game = rt.add_image("Assembly-CSharp.dll");
        let player = rt.add_class(game, "Game", "PLAYERXQWER");
        let mut handles = Vec::new();
        for name in &NOISE[..4] {
            handles.push(rt.add_method(player, name, public(), STUB));
        }
        handles.push(rt.add_method(player, ".ctor", public() | MethodAttributes::SPECIAL_NAME, 0x5000));

        let filler = rt.add_class(game, "Game", "Filler");
        rt.add_method(filler, "Start", public(), 0x6000);
        for name in &NOISE[4..] {
            rt.add_method(filler, name, public(), STUB);
        }
        (rt, game, player, handles)
    }

    #[test]
    fn test_player_scenario() {
        let (rt, _, player, handles) = player_scenario();
        let (_, result) = classify(&rt);

        for &m in &handles[..4] {
            assert_eq!(result.verdict(m), Verdict::Fake(FakeReason::SharedPointer(10)));
        }
        assert_eq!(result.verdict(handles[4]), Verdict::Real);

        let analysis = result.class_analysis().iter().find(|a| a.class == player).unwrap();
        assert_eq!((analysis.total_methods, analysis.fake_methods, analysis.real_methods), (5, 4, 1));
        assert!(!analysis.is_entirely_fake);
        assert!(!result.is_entirely_fake_class(player));
    }

    #[test]
    fn test_normal_name_on_stub_is_real() {
        let (mut rt, _, player, _) = player_scenario();
        let update = rt.add_method(player, "Update", public(), STUB);
        let (_, result) = classify(&rt);

        assert_eq!(result.index().share_count(Address::new(STUB)), 11);
        assert!(!result.is_fake_method(update));
        assert!(result.is_stub_address(Address::new(STUB)));
    }

    #[test]
    fn test_virtual_and_abstract_are_always_real() {
        let (mut rt, _, player, _) = player_scenario();
        let virt = rt.add_method(player, "VVVVVVVVVVV", public() | MethodAttributes::VIRTUAL, STUB);
        let abs = rt.add_method(player, "WWWWWWWWWWW", public() | MethodAttributes::ABSTRACT, 0);
        let (_, result) = classify(&rt);

        assert!(!result.is_fake_method(virt));
        assert!(!result.is_fake_method(abs));
        assert_eq!(result.vtable_method_count(), 2);
    }

    #[test]
    fn test_vtable_whitelist_can_be_disabled() {
        let (mut rt, _, player, _) = player_scenario();
        let virt = rt.add_method(player, "VVVVVVVVVVV", public() | MethodAttributes::VIRTUAL, STUB);
        let snapshot = MetadataEnumerator::new(&rt).enumerate();
        let result = MethodClassifier::new(ClassifierConfig::default().with_vtable_whitelist(false)).classify(&snapshot);

        assert!(result.is_fake_method(virt));
        assert_eq!(result.vtable_method_count(), 0);
    }

    #[test]
    fn test_null_pointer_rule() {
        let mut rt = FakeRuntime::new();
        let game = rt.add_image("Assembly-CSharp.dll");
        let class = rt.add_class(game, "Game", "Buffer");
        let noise = rt.add_method(class, "QQQQQQQQQQQ", public(), 0);
        let generic_def = rt.add_method(class, "ToArray", public(), 0);
        let (_, result) = classify(&rt);

        assert_eq!(result.verdict(noise), Verdict::Fake(FakeReason::NullPointer));
        assert_eq!(result.verdict(generic_def), Verdict::Real);
        assert_eq!(result.index().len(), 0);
    }

    #[test]
    fn test_exempt_and_generic_owners_never_indexed() {
        let mut rt = FakeRuntime::new();
        let engine = rt.add_image("UnityEngine.CoreModule.dll");
        let game = rt.add_image("Assembly-CSharp.dll");
        let engine_class = rt.add_class(engine, "UnityEngine", "Transform");
        let pool = rt.add_class(game, "Game", "Pool`1");
        let mut exempt = Vec::new();
        for name in NOISE.iter() {
            exempt.push(rt.add_method(engine_class, name, public(), STUB));
            rt.add_method(pool, name, public(), STUB);
        }
        let (_, result) = classify(&rt);

        assert_eq!(result.total_methods(), 20);
        assert_eq!(result.exempt_methods(), 10);
        assert_eq!(result.generic_skipped(), 10);
        assert!(result.index().is_empty());
        assert_eq!(result.stub_count(), 0);
        assert!(exempt.iter().all(|&m| !result.is_fake_method(m)));
        assert_eq!(result.fake_method_count(), 0);
    }

    #[test]
    fn test_entirely_fake_class() {
        let mut rt = FakeRuntime::new();
        let game = rt.add_image("Assembly-CSharp.dll");
        let junk = rt.add_class(game, "", "JUNKCLASSXX");
        for name in NOISE.iter() {
            rt.add_method(junk, name, public(), STUB);
        }
        rt.add_method(junk, ".ctor", public(), 0x5000);
        let (_, result) = classify(&rt);

        let analysis = &result.class_analysis()[0];
        assert_eq!((analysis.total_methods, analysis.fake_methods, analysis.real_methods), (11, 10, 1));
        assert!(analysis.is_entirely_fake);
        assert!(result.is_entirely_fake_class(junk));
        assert_eq!(result.fake_class_count(), 1);
        assert!(result.fake_methods()[0].signature.starts_with("void JUNKCLASSXX::AAAAAAAAAAA("));
    }

    #[test]
    fn test_threshold_respected() {
        let (rt, _, _, handles) = player_scenario();
        let snapshot = MetadataEnumerator::new(&rt).enumerate();
        let result = MethodClassifier::new(ClassifierConfig::default().with_threshold(11)).classify(&snapshot);

        assert!(!result.is_fake_method(handles[0]));
        assert!(result.stub_addresses().is_empty());
    }
}
