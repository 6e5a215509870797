// Mon Feb 16 2026 - Alex

use crate::classifier::Classification;
use crate::config::OutputConfig;
use crate::metadata::{
    MetadataSnapshot, RuntimeField, RuntimeMethod, RuntimeProperty, RuntimeType, TypeKind, TypeRef, Visibility,
};
use crate::output::filter::EmitFilter;
use crate::output::unit::SourceUnit;
use crate::resolver::{
    recover_namespace, sanitize_identifier, NamespacePolicy, ResolveContext, ResolvedType, TypeResolver, GLOBAL_NAMESPACE,
};
use crate::resolver::resolver::{generic_param_name, NATIVE_INT, SYSTEM_TYPE};
use crate::runtime::{MethodHandle, TypeCode, TypeHandle};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Base of every class wrapper whose own base cannot be declared.
pub const ROOT_WRAPPER: &str = "Il2CppObject";

const EMPTY_TYPES: &str = "global::System.Type.EmptyTypes";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisStats {
    pub declarations: usize,
    pub class_wrappers: usize,
    pub duplicate_types: usize,
    pub duplicate_members: usize,
    pub fake_methods_skipped: usize,
    pub fake_properties_skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    pub units: Vec<SourceUnit>,
    pub stats: SynthesisStats,
}

struct Param {
    name: String,
    ty: ResolvedType,
    modifier: Option<&'static str>,
}

impl Param {
    fn declaration(&self) -> String {
        match self.modifier {
            Some(modifier) => format!("{} {} {}", modifier, self.ty.display, self.name),
            None => format!("{} {}", self.ty.display, self.name),
        }
    }
}

/// The type that keeps a display name inside a namespace; later types with
/// the same name are suppressed.
#[derive(Debug, Clone, Copy)]
struct Survivor {
    handle: TypeHandle,
    kind: TypeKind,
}

type Survivors = AHashMap<(String, String), Survivor>;

/// Names already taken inside one class body.
struct MemberScope {
    names: AHashSet<String>,
    signatures: AHashSet<String>,
}

impl MemberScope {
    fn new(type_name: &str) -> Self {
        let mut names = AHashSet::new();
        // A member may not share its enclosing type's name.
        names.insert(type_name.to_string());
        Self {
            names,
            signatures: AHashSet::new(),
        }
    }

    fn claim_name(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Overloads may share a name with each other, never with a field or property.
    fn claim_method(&mut self, name: &str, params: &[Param]) -> bool {
        if self.names.contains(name) {
            return false;
        }
        let key = format!("{}({})", name, params.iter().map(|p| p.ty.display.as_str()).join(","));
        self.signatures.insert(key)
    }
}

/// Emits one source unit per recovered namespace.
pub struct InteropSynthesizer<'a> {
    snapshot: &'a MetadataSnapshot,
    classification: &'a Classification,
    resolver: &'a TypeResolver<'a>,
    filter: &'a EmitFilter<'a>,
    config: &'a OutputConfig,
}

impl<'a> InteropSynthesizer<'a> {
    pub fn new(
        snapshot: &'a MetadataSnapshot,
        classification: &'a Classification,
        resolver: &'a TypeResolver<'a>,
        filter: &'a EmitFilter<'a>,
        config: &'a OutputConfig,
    ) -> Self {
        Self {
            snapshot,
            classification,
            resolver,
            filter,
            config,
        }
    }

    pub fn synthesize(&self) -> Synthesis {
        let mut buckets: BTreeMap<String, Vec<&RuntimeType>> = BTreeMap::new();
        for ty in self.filter.emittable(self.snapshot) {
            buckets.entry(self.resolver.namespace_of(ty.handle)).or_default().push(ty);
        }

        for types in buckets.values_mut() {
            types.sort_by_key(|t| t.kind);
        }
        let survivors = self.survivors(&buckets);

        let mut synthesis = Synthesis::default();
        for (namespace, types) in &buckets {
            let unit = self.build_unit(namespace, types, &survivors, &mut synthesis.stats);
            if unit.is_empty() {
                continue;
            }
            log::debug!(
                "unit {}: {} declarations, {} class wrappers",
                unit.file_name,
                unit.declarations,
                unit.class_wrappers
            );
            synthesis.units.push(unit);
        }

        log::info!(
            "Synthesized {} declarations in {} units ({} duplicate types, {} duplicate members suppressed)",
            synthesis.stats.declarations,
            synthesis.units.len(),
            synthesis.stats.duplicate_types,
            synthesis.stats.duplicate_members
        );
        synthesis
    }

    fn policy(&self) -> &NamespacePolicy {
        self.resolver.policy()
    }

    /// First type per (namespace, display name) in emission order.
    fn survivors(&self, buckets: &BTreeMap<String, Vec<&RuntimeType>>) -> Survivors {
        let mut survivors = Survivors::new();
        for (namespace, types) in buckets {
            for ty in types {
                if let Some(name) = self.resolver.declared_name(ty) {
                    survivors.entry((namespace.clone(), name)).or_insert(Survivor {
                        handle: ty.handle,
                        kind: ty.kind,
                    });
                }
            }
        }
        survivors
    }

    fn build_unit(
        &self,
        namespace: &str,
        types: &[&RuntimeType],
        survivors: &Survivors,
        stats: &mut SynthesisStats,
    ) -> SourceUnit {
        let mut unit = SourceUnit::new(&self.config.file_prefix, namespace);
        let ctx = ResolveContext::new(namespace);

        for ty in types {
            let Some(name) = self.resolver.declared_name(ty) else {
                continue;
            };
            let key = (namespace.to_string(), name);
            if survivors.get(&key).map(|s| s.handle) != Some(ty.handle) {
                log::debug!("duplicate declaration {}.{} ({}) suppressed", namespace, key.1, ty.name);
                stats.duplicate_types += 1;
                continue;
            }

            if self.config.friendly_summaries && self.resolver.mapping().resolve_type(&ty.name).is_some() {
                unit.body.push_str(&summary("    ", ty.kind.keyword(), &ty.name));
            }
            let name = key.1;
            let out = &mut unit.body;
            match ty.kind {
                TypeKind::Delegate => self.write_delegate(out, ty, &name, &ctx),
                TypeKind::Enum => self.write_enum(out, ty, &name, stats),
                TypeKind::Interface => write_interface(out, ty, &name),
                TypeKind::Struct => self.write_struct(out, ty, &name, &ctx, stats),
                TypeKind::Class => {
                    self.write_class(out, ty, &name, &ctx, survivors, stats);
                    unit.class_wrappers += 1;
                    stats.class_wrappers += 1;
                }
            }
            unit.body.push('\n');
            unit.declarations += 1;
            stats.declarations += 1;
        }
        unit
    }

    fn write_delegate(&self, out: &mut String, ty: &RuntimeType, name: &str, ctx: &ResolveContext<'_>) {
        let vis = ty.visibility.keyword();
        match ty.methods.iter().find(|m| m.name == "Invoke") {
            Some(invoke) => {
                let ctx = ctx.with_method_generic(invoke.generic);
                let ret = self.return_type(invoke, &ctx);
                let params = self.params(invoke, &ctx);
                out.push_str(&format!(
                    "    {} delegate {} {}({});\n",
                    vis,
                    ret.display,
                    name,
                    params.iter().map(Param::declaration).join(", ")
                ));
            }
            None => out.push_str(&format!("    {} delegate void {}();\n", vis, name)),
        }
    }

    fn write_enum(&self, out: &mut String, ty: &RuntimeType, name: &str, stats: &mut SynthesisStats) {
        let mut scope = MemberScope::new(name);
        let mut literals = Vec::new();
        for field in ty.fields.iter().filter(|f| f.flags.is_literal()) {
            let Some(member) = self.member_name(ty, &field.name) else {
                continue;
            };
            if !scope.claim_name(&member) {
                stats.duplicate_members += 1;
                continue;
            }
            literals.push((member, field.constant.unwrap_or(0)));
        }

        let wide = literals.iter().any(|(_, v)| i32::try_from(*v).is_err());
        out.push_str(&format!("    {} enum {}", ty.visibility.keyword(), name));
        if wide {
            out.push_str(" : long");
        }
        out.push_str("\n    {\n");
        let lines = literals.iter().map(|(member, value)| format!("        {} = {}", member, value)).join(",\n");
        if !lines.is_empty() {
            out.push_str(&lines);
            out.push('\n');
        }
        out.push_str("    }\n");
    }

    fn write_struct(
        &self,
        out: &mut String,
        ty: &RuntimeType,
        name: &str,
        ctx: &ResolveContext<'_>,
        stats: &mut SynthesisStats,
    ) {
        out.push_str(&format!("    {} struct {}\n    {{\n", ty.visibility.keyword(), name));
        let mut scope = MemberScope::new(name);
        let mut written = 0;
        for field in &ty.fields {
            if field.flags.is_static() || field.flags.is_literal() || field.name.starts_with('<') {
                continue;
            }
            let Some(field_ty) = &field.ty else {
                continue;
            };
            let Some(member) = self.member_name(ty, &field.name) else {
                continue;
            };
            if !scope.claim_name(&member) {
                stats.duplicate_members += 1;
                continue;
            }
            let resolved = self.resolver.resolve(field_ty, ctx);
            out.push_str(&format!("        public {} {};\n", resolved.display, member));
            written += 1;
        }
        if written == 0 {
            out.push_str("        // Stub struct\n");
        }
        out.push_str("    }\n");
    }

    fn write_class(
        &self,
        out: &mut String,
        ty: &RuntimeType,
        name: &str,
        ctx: &ResolveContext<'_>,
        survivors: &Survivors,
        stats: &mut SynthesisStats,
    ) {
        let base = self.base_name(ty, name, ctx, survivors);
        out.push_str(&format!("    {} partial class {} : {}\n", ty.visibility.keyword(), name, base));
        out.push_str("    {\n");
        out.push_str(&format!(
            "        public {}({} nativePtr) : base(nativePtr) {{ }}\n",
            name, NATIVE_INT
        ));

        let mut scope = MemberScope::new(name);
        if !ty.is_static() {
            self.write_fields(out, ty, ctx, &mut scope, stats);
        }
        let accessors = self.write_properties(out, ty, ctx, &mut scope, stats);
        self.write_methods(out, ty, ctx, &accessors, &mut scope, stats);
        out.push_str("    }\n");
    }

    fn base_name(&self, ty: &RuntimeType, name: &str, ctx: &ResolveContext<'_>, survivors: &Survivors) -> String {
        let Some(base) = &ty.base else {
            return ROOT_WRAPPER.to_string();
        };
        if matches!(base, TypeRef::Primitive { code: TypeCode::Object }) {
            return ROOT_WRAPPER.to_string();
        }
        let Some(handle) = base.class_handle() else {
            return ROOT_WRAPPER.to_string();
        };
        // Only declared wrappers can be inherited from.
        let namespace = recover_namespace(&self.snapshot.classes, handle);
        if self.policy().is_skipped(&namespace) {
            return ROOT_WRAPPER.to_string();
        }
        // The name must still denote a class once duplicates are suppressed.
        let declared = self
            .snapshot
            .class_name(handle)
            .and_then(|c| self.resolver.type_display_name(&c.name));
        let Some(declared) = declared else {
            return ROOT_WRAPPER.to_string();
        };
        let survivor = survivors.get(&(self.resolver.namespace_of(handle), declared));
        if !survivor.is_some_and(|s| s.kind == TypeKind::Class) {
            return ROOT_WRAPPER.to_string();
        }
        let resolved = self.resolver.resolve(base, ctx);
        if resolved.erased || resolved.display == name {
            return ROOT_WRAPPER.to_string();
        }
        resolved.display
    }

    fn write_fields(
        &self,
        out: &mut String,
        ty: &RuntimeType,
        ctx: &ResolveContext<'_>,
        scope: &mut MemberScope,
        stats: &mut SynthesisStats,
    ) {
        let mut header = false;
        for field in ty.fields.iter().filter(|f| is_wrapped_field(f)) {
            let Some(field_ty) = &field.ty else {
                continue;
            };
            let Some(member) = self.member_name(ty, &field.name) else {
                continue;
            };
            if !scope.claim_name(&member) {
                stats.duplicate_members += 1;
                continue;
            }
            if !header {
                out.push_str("\n        // Fields\n");
                header = true;
            }
            let resolved = self.resolver.resolve(field_ty, ctx);
            let raw = csharp_string(&field.name);
            self.push_member_summary(out, ty, "field", &field.name);
            out.push_str(&format!(
                "        {} {} {}\n",
                Visibility::of_field(field.flags).keyword(),
                resolved.display,
                member
            ));
            out.push_str("        {\n");
            out.push_str(&format!(
                "            get => Il2CppRuntime.GetField<{}>(this, \"{}\");\n",
                resolved.display, raw
            ));
            out.push_str(&format!(
                "            set => Il2CppRuntime.SetField<{}>(this, \"{}\", value);\n",
                resolved.display, raw
            ));
            out.push_str("        }\n\n");
        }
    }

    /// Returns every accessor handle of the type, written or not.
    fn write_properties(
        &self,
        out: &mut String,
        ty: &RuntimeType,
        ctx: &ResolveContext<'_>,
        scope: &mut MemberScope,
        stats: &mut SynthesisStats,
    ) -> AHashSet<MethodHandle> {
        let accessors: AHashSet<MethodHandle> = ty.properties.iter().flat_map(|p| p.accessors()).collect();
        let mut header = false;

        for property in &ty.properties {
            let Some(prop_ty) = &property.ty else {
                continue;
            };
            if self.is_indexer(ty, property) {
                continue;
            }
            if self.is_fake_property(property) {
                stats.fake_properties_skipped += 1;
                continue;
            }
            let Some(member) = self.member_name(ty, &property.name) else {
                continue;
            };
            if !scope.claim_name(&member) {
                stats.duplicate_members += 1;
                continue;
            }
            if !header {
                out.push_str("\n        // Properties\n");
                header = true;
            }

            let resolved = self.resolver.resolve(prop_ty, ctx);
            let is_static = property.flags.is_static();
            self.push_member_summary(out, ty, "property", &property.name);
            out.push_str(&format!(
                "        {}{} {} {}\n",
                Visibility::of_method(property.flags).keyword(),
                if is_static { " static" } else { "" },
                resolved.display,
                member
            ));
            out.push_str("        {\n");
            if let Some(getter) = property.getter {
                let raw = self.accessor_name(ty, getter, "get_", &property.name);
                let call = if is_static {
                    format!(
                        "Il2CppRuntime.CallStatic<{}>({}, \"{}\", {})",
                        resolved.display,
                        self.static_target(ty),
                        raw,
                        EMPTY_TYPES
                    )
                } else {
                    format!("Il2CppRuntime.Call<{}>(this, \"{}\", {})", resolved.display, raw, EMPTY_TYPES)
                };
                out.push_str(&format!("            get => {};\n", call));
            }
            if let Some(setter) = property.setter {
                let raw = self.accessor_name(ty, setter, "set_", &property.name);
                let types = format!("new[] {{ typeof({}) }}", resolved.display);
                let call = if is_static {
                    format!(
                        "Il2CppRuntime.InvokeStaticVoid({}, \"{}\", {}, value)",
                        self.static_target(ty),
                        raw,
                        types
                    )
                } else {
                    format!("Il2CppRuntime.InvokeVoid(this, \"{}\", {}, value)", raw, types)
                };
                out.push_str(&format!("            set => {};\n", call));
            }
            out.push_str("        }\n\n");
        }
        accessors
    }

    fn write_methods(
        &self,
        out: &mut String,
        ty: &RuntimeType,
        ctx: &ResolveContext<'_>,
        accessors: &AHashSet<MethodHandle>,
        scope: &mut MemberScope,
        stats: &mut SynthesisStats,
    ) {
        let mut header = false;
        for method in &ty.methods {
            if !is_wrapped_method(method, accessors) {
                continue;
            }
            if self.classification.is_fake_method(method.handle) {
                stats.fake_methods_skipped += 1;
                continue;
            }
            let Some(member) = self.member_name(ty, &method.name) else {
                continue;
            };

            let ctx = ctx.with_method_generic(method.generic);
            let ret = self.return_type(method, &ctx);
            let params = self.params(method, &ctx);
            if !scope.claim_method(&member, &params) {
                stats.duplicate_members += 1;
                continue;
            }
            if !header {
                out.push_str("\n        // Methods\n");
                header = true;
            }

            let generics = match method.generic {
                Some(container) if container.count > 0 => format!(
                    "<{}>",
                    (0..container.count).map(|i| generic_param_name(i, container.count)).join(", ")
                ),
                _ => String::new(),
            };
            self.push_member_summary(out, ty, "method", &method.name);
            out.push_str(&format!(
                "        {}{} {} {}{}({})\n",
                Visibility::of_method(method.flags).keyword(),
                if method.is_static() { " static" } else { "" },
                ret.display,
                member,
                generics,
                params.iter().map(Param::declaration).join(", ")
            ));
            out.push_str("        {\n");
            for param in params.iter().filter(|p| p.modifier == Some("out")) {
                out.push_str(&format!("            {} = default;\n", param.name));
            }
            out.push_str(&format!("            {};\n", self.invocation(ty, method, &ret, &params)));
            out.push_str("        }\n\n");
        }
    }

    fn invocation(&self, ty: &RuntimeType, method: &RuntimeMethod, ret: &ResolvedType, params: &[Param]) -> String {
        let types = if params.is_empty() {
            EMPTY_TYPES.to_string()
        } else {
            format!(
                "new {}[] {{ {} }}",
                SYSTEM_TYPE,
                params.iter().map(|p| format!("typeof({})", p.ty.display)).join(", ")
            )
        };
        let args: String = params.iter().map(|p| format!(", {}", p.name)).collect();
        let raw = csharp_string(&method.name);

        match (method.is_static(), ret.is_void()) {
            (true, true) => format!(
                "Il2CppRuntime.InvokeStaticVoid({}, \"{}\", {}{})",
                self.static_target(ty),
                raw,
                types,
                args
            ),
            (true, false) => format!(
                "return Il2CppRuntime.CallStatic<{}>({}, \"{}\", {}{})",
                ret.display,
                self.static_target(ty),
                raw,
                types,
                args
            ),
            (false, true) => format!("Il2CppRuntime.InvokeVoid(this, \"{}\", {}{})", raw, types, args),
            (false, false) => format!(
                "return Il2CppRuntime.Call<{}>(this, \"{}\", {}{})",
                ret.display, raw, types, args
            ),
        }
    }

    /// `"Namespace", "Class"` as the runtime looks the class up.
    fn static_target(&self, ty: &RuntimeType) -> String {
        let namespace = if ty.namespace.is_empty() {
            GLOBAL_NAMESPACE
        } else {
            ty.namespace.as_str()
        };
        format!("\"{}\", \"{}\"", csharp_string(namespace), csharp_string(&ty.name))
    }

    fn accessor_name(&self, ty: &RuntimeType, accessor: MethodHandle, prefix: &str, property: &str) -> String {
        match ty.method(accessor) {
            Some(method) if !method.name.is_empty() => csharp_string(&method.name),
            _ => csharp_string(&format!("{}{}", prefix, property)),
        }
    }

    fn return_type(&self, method: &RuntimeMethod, ctx: &ResolveContext<'_>) -> ResolvedType {
        match &method.return_type {
            Some(ty) => self.resolver.resolve(ty, ctx),
            None => ResolvedType::exact("void"),
        }
    }

    fn params(&self, method: &RuntimeMethod, ctx: &ResolveContext<'_>) -> Vec<Param> {
        let mut taken = AHashSet::new();
        method
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let name = param
                    .name
                    .as_deref()
                    .and_then(sanitize_identifier)
                    .filter(|n| !taken.contains(n))
                    .unwrap_or_else(|| format!("arg{}", i));
                taken.insert(name.clone());
                Param {
                    name,
                    ty: self.resolver.resolve(&param.ty, ctx),
                    modifier: param.by_ref.modifier(),
                }
            })
            .collect()
    }

    fn member_name(&self, ty: &RuntimeType, raw: &str) -> Option<String> {
        self.resolver.member_display_name(&ty.name, raw)
    }

    fn push_member_summary(&self, out: &mut String, ty: &RuntimeType, kind: &str, raw: &str) {
        if self.config.friendly_summaries && self.resolver.mapping().resolve_member(&ty.name, raw).is_some() {
            out.push_str(&summary("        ", kind, raw));
        }
    }

    /// Fake when every accessor it has is fake.
    fn is_fake_property(&self, property: &RuntimeProperty) -> bool {
        let mut accessors = property.accessors().peekable();
        accessors.peek().is_some() && accessors.all(|m| self.classification.is_fake_method(m))
    }

    fn is_indexer(&self, ty: &RuntimeType, property: &RuntimeProperty) -> bool {
        property
            .getter
            .and_then(|g| ty.method(g))
            .is_some_and(|getter| !getter.params.is_empty())
    }
}

fn write_interface(out: &mut String, ty: &RuntimeType, name: &str) {
    out.push_str(&format!("    {} interface {}\n", ty.visibility.keyword(), name));
    out.push_str("    {\n        // Stub interface\n    }\n");
}

fn summary(indent: &str, kind: &str, raw: &str) -> String {
    format!("{}/// <summary>Deobfuscated {}. IL2CPP name: '{}'</summary>\n", indent, kind, raw)
}

fn is_wrapped_field(field: &RuntimeField) -> bool {
    !(field.flags.is_literal()
        || field.flags.is_static()
        || field.flags.is_compiler_controlled()
        || field.name.starts_with('<'))
}

fn is_wrapped_method(method: &RuntimeMethod, accessors: &AHashSet<MethodHandle>) -> bool {
    if method.is_constructor_like() || accessors.contains(&method.handle) {
        return false;
    }
    if method.flags.is_special_name()
        && ["add_", "remove_", "op_"].iter().any(|p| method.name.starts_with(p))
    {
        return false;
    }
    !method.flags.is_abstract()
}

/// Escapes a raw runtime name for a C# string literal.
fn csharp_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
