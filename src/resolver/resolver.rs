// Mon Feb 16 2026 - Alex

use crate::mapping::NameMapping;
use crate::metadata::registry::{encoded_arity, strip_arity};
use crate::metadata::{GenericScope, KnownTypeRegistry, MetadataSnapshot, RuntimeType, TypeRef};
use crate::resolver::generics::{known_generic, GenericMapping};
use crate::resolver::namespace::{effective_namespace, recover_namespace, NamespacePolicy};
use crate::resolver::sanitize::{sanitize_identifier, sanitize_namespace};
use crate::runtime::{GenericContainer, TypeCode, TypeHandle};
use itertools::Itertools;

pub const PLACEHOLDER: &str = "object";

/// Framework names are printed qualified; emitted declarations may reuse the short names.
pub const NATIVE_INT: &str = "global::System.IntPtr";
pub const NATIVE_UINT: &str = "global::System.UIntPtr";
pub const SYSTEM_TYPE: &str = "global::System.Type";

/// Where a reference is printed from.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'c> {
    /// Effective namespace of the unit being written.
    pub current_namespace: &'c str,
    /// Generic container of the method being written, if any.
    pub method_generic: Option<GenericContainer>,
}

impl<'c> ResolveContext<'c> {
    pub fn new(current_namespace: &'c str) -> Self {
        Self {
            current_namespace,
            method_generic: None,
        }
    }

    pub fn with_method_generic(mut self, container: Option<GenericContainer>) -> Self {
        self.method_generic = container;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedType {
    pub display: String,
    /// The original type could not be represented and was replaced.
    pub erased: bool,
}

impl ResolvedType {
    pub fn exact(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            erased: false,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            display: PLACEHOLDER.to_string(),
            erased: true,
        }
    }

    pub fn is_void(&self) -> bool {
        self.display == "void"
    }
}

/// Well-known `System` value types print as their keywords.
fn boxed_keyword(name: &str) -> Option<&'static str> {
    Some(match name {
        "Void" => "void",
        "Boolean" => "bool",
        "Char" => "char",
        "SByte" => "sbyte",
        "Byte" => "byte",
        "Int16" => "short",
        "UInt16" => "ushort",
        "Int32" => "int",
        "UInt32" => "uint",
        "Int64" => "long",
        "UInt64" => "ulong",
        "Single" => "float",
        "Double" => "double",
        "String" => "string",
        "Object" => "object",
        "IntPtr" => NATIVE_INT,
        "UIntPtr" => NATIVE_UINT,
        _ => return None,
    })
}

/// Positional name of the `local`th of `count` method generic parameters.
pub fn generic_param_name(local: u32, count: u32) -> String {
    if count == 1 {
        "T".to_string()
    } else {
        format!("T{}", local + 1)
    }
}

/// Turns type references into C# source text that only mentions types the
/// output declares or the framework provides.
pub struct TypeResolver<'a> {
    snapshot: &'a MetadataSnapshot,
    registry: &'a KnownTypeRegistry,
    mapping: &'a NameMapping,
    policy: &'a NamespacePolicy,
}

impl<'a> TypeResolver<'a> {
    pub fn new(
        snapshot: &'a MetadataSnapshot,
        registry: &'a KnownTypeRegistry,
        mapping: &'a NameMapping,
        policy: &'a NamespacePolicy,
    ) -> Self {
        Self {
            snapshot,
            registry,
            mapping,
            policy,
        }
    }

    pub fn mapping(&self) -> &NameMapping {
        self.mapping
    }

    pub fn policy(&self) -> &NamespacePolicy {
        self.policy
    }

    /// Effective namespace a class is declared under.
    pub fn namespace_of(&self, class: TypeHandle) -> String {
        effective_namespace(&recover_namespace(&self.snapshot.classes, class)).to_string()
    }

    /// Declared name of a raw type name: the friendly name when mapped,
    /// otherwise the sanitised name without its arity suffix.
    pub fn type_display_name(&self, raw_name: &str) -> Option<String> {
        if let Some(friendly) = self.mapping.resolve_type(raw_name).and_then(sanitize_identifier) {
            return Some(friendly);
        }
        sanitize_identifier(strip_arity(raw_name))
    }

    /// Declared name of an enumerated type.
    pub fn declared_name(&self, ty: &RuntimeType) -> Option<String> {
        self.type_display_name(&ty.name)
    }

    /// Friendly or sanitised name of a member of the raw type `owner`.
    pub fn member_display_name(&self, owner: &str, raw_member: &str) -> Option<String> {
        if let Some(friendly) = self.mapping.resolve_member(owner, raw_member).and_then(sanitize_identifier) {
            return Some(friendly);
        }
        sanitize_identifier(raw_member)
    }

    pub fn resolve(&self, ty: &TypeRef, ctx: &ResolveContext<'_>) -> ResolvedType {
        match ty {
            TypeRef::Primitive { code } => match code {
                TypeCode::I => ResolvedType::exact(NATIVE_INT),
                TypeCode::U => ResolvedType::exact(NATIVE_UINT),
                _ => code.keyword().map_or_else(ResolvedType::placeholder, ResolvedType::exact),
            },
            TypeRef::Class { class } => self.resolve_class(*class, None, ctx),
            TypeRef::GenericInst { class, args } => self.resolve_class(*class, Some(args.as_deref()), ctx),
            TypeRef::Array { element, rank, vector } => {
                let inner = self.resolve(element, ctx);
                let marker = if *vector || *rank <= 1 {
                    "[]".to_string()
                } else {
                    format!("[{}]", ",".repeat(*rank as usize - 1))
                };
                ResolvedType {
                    display: format!("{}{}", inner.display, marker),
                    erased: inner.erased,
                }
            }
            TypeRef::GenericParam { scope: GenericScope::Method, index } => {
                self.resolve_method_param(*index, ctx).unwrap_or_else(ResolvedType::placeholder)
            }
            TypeRef::GenericParam { scope: GenericScope::Type, .. } => ResolvedType::placeholder(),
            TypeRef::Pointer { .. } => ResolvedType {
                display: NATIVE_INT.to_string(),
                erased: true,
            },
            TypeRef::Unknown => ResolvedType::placeholder(),
        }
    }

    fn resolve_method_param(&self, index: u32, ctx: &ResolveContext<'_>) -> Option<ResolvedType> {
        let container = ctx.method_generic?;
        let local = index.checked_sub(container.start)?;
        if local >= container.count {
            return None;
        }
        Some(ResolvedType::exact(generic_param_name(local, container.count)))
    }

    /// `args` is `None` for a plain class reference, `Some(None)` for an
    /// instantiation whose arguments could not be read.
    fn resolve_class(
        &self,
        class: TypeHandle,
        args: Option<Option<&[TypeRef]>>,
        ctx: &ResolveContext<'_>,
    ) -> ResolvedType {
        let Some(entry) = self.snapshot.class_name(class) else {
            return ResolvedType::placeholder();
        };
        if entry.name.is_empty() {
            return ResolvedType::placeholder();
        }

        if entry.namespace == "System" {
            if let Some(keyword) = boxed_keyword(&entry.name) {
                return ResolvedType::exact(keyword);
            }
        }

        let namespace = recover_namespace(&self.snapshot.classes, class);
        if self.policy.is_erased(&namespace) {
            return ResolvedType::placeholder();
        }

        let framework = self.policy.is_skipped(&namespace);
        let generic = entry.name.contains('`') || args.is_some();
        if generic {
            let base = strip_arity(&entry.name);
            let arity = encoded_arity(&entry.name)
                .or_else(|| args.flatten().map(<[TypeRef]>::len))
                .unwrap_or(0);

            match known_generic(&namespace, base, arity) {
                Some(GenericMapping::Parameterized(name)) => {
                    return self.parameterize(name, arity, args.flatten(), ctx);
                }
                Some(GenericMapping::Bare(name)) => return ResolvedType::exact(name),
                Some(GenericMapping::Erased) => return ResolvedType::placeholder(),
                None if framework => return ResolvedType::placeholder(),
                None => {}
            }
        }

        if framework {
            let Some(name) = sanitize_identifier(&entry.name) else {
                return ResolvedType::placeholder();
            };
            return ResolvedType::exact(format!("global::{}.{}", namespace, name));
        }

        let effective = effective_namespace(&namespace);
        if !self.registry.contains(effective, &entry.name) {
            return ResolvedType::placeholder();
        }
        match self.type_display_name(&entry.name) {
            Some(name) => ResolvedType::exact(self.qualify(effective, &name, ctx)),
            None => ResolvedType::placeholder(),
        }
    }

    fn parameterize(
        &self,
        name: &str,
        arity: usize,
        args: Option<&[TypeRef]>,
        ctx: &ResolveContext<'_>,
    ) -> ResolvedType {
        match args {
            Some(args) if !args.is_empty() => {
                let resolved: Vec<ResolvedType> = args.iter().map(|a| self.resolve(a, ctx)).collect();
                ResolvedType {
                    display: format!("{}<{}>", name, resolved.iter().map(|r| r.display.as_str()).join(", ")),
                    erased: resolved.iter().any(|r| r.erased),
                }
            }
            _ => ResolvedType {
                display: format!("{}<{}>", name, vec![PLACEHOLDER; arity.max(1)].join(", ")),
                erased: true,
            },
        }
    }

    /// Short name inside the current namespace, `global::`-qualified elsewhere.
    pub fn qualify(&self, effective_ns: &str, name: &str, ctx: &ResolveContext<'_>) -> String {
        if effective_ns == ctx.current_namespace {
            name.to_string()
        } else {
            format!("global::{}.{}", sanitize_namespace(effective_ns), name)
        }
    }
}
