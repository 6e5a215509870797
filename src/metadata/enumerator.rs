// Mon Feb 16 2026 - Alex

use crate::memory::{Address, LayoutReader, MemoryProbe};
use crate::metadata::{
    ByRefKind, ClassName, ImageInfo, MetadataSnapshot, RuntimeField, RuntimeMethod, RuntimeParam, RuntimeProperty,
    RuntimeType, TypeKind, TypeRef, Visibility,
};
use crate::metadata::type_ref::GenericScope;
use crate::runtime::{GenericContainer, MethodHandle, RuntimeApi, TypeCode, TypeHandle, TypeRefHandle};
use ahash::AHashSet;
use indexmap::IndexMap;

/// Deepest array/pointer/generic nesting followed before a reference is given up as unknown.
pub const MAX_TYPE_DEPTH: usize = 32;
/// Longest declaring-type chain recorded for a class.
pub const MAX_DECLARING_DEPTH: usize = 16;

/// Walks the runtime once and captures everything later phases need.
pub struct MetadataEnumerator<'a> {
    api: &'a dyn RuntimeApi,
    reader: Option<LayoutReader<'a, dyn MemoryProbe + 'a>>,
}

impl<'a> MetadataEnumerator<'a> {
    pub fn new(api: &'a dyn RuntimeApi) -> Self {
        Self { api, reader: None }
    }

    /// Direct structure reads used when an accessor cannot supply a code
    /// pointer or generic container.
    pub fn with_layout_reader(mut self, reader: LayoutReader<'a, dyn MemoryProbe + 'a>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn enumerate(&self) -> MetadataSnapshot {
        let mut snapshot = MetadataSnapshot::default();
        let mut classes = IndexMap::new();
        let mut seen = AHashSet::new();

        let assemblies = self.api.domain_assemblies();
        snapshot.assembly_count = assemblies.len();

        for assembly in assemblies {
            let Some(image) = self.api.assembly_image(assembly) else {
                log::debug!("{} has no image", assembly);
                continue;
            };
            let index = snapshot.images.len();
            let name = self.api.image_name(image).unwrap_or_default();
            snapshot.images.push(ImageInfo { handle: image, index, name });
        }

        for image in &snapshot.images {
            let count = self.api.image_class_count(image.handle);
            log::debug!("image {} ({}): {} classes", image.index, image.name, count);

            for i in 0..count {
                let Some(class) = self.api.image_class(image.handle, i) else {
                    continue;
                };
                if !seen.insert(class) {
                    continue;
                }
                match self.read_type(class, image.index, &mut classes) {
                    Some(ty) => snapshot.types.push(ty),
                    None => snapshot.unnamed_types += 1,
                }
            }
        }

        snapshot.classes = classes;
        log::info!(
            "Enumerated {} types ({} methods) across {} images",
            snapshot.types.len(),
            snapshot.method_count(),
            snapshot.images.len()
        );
        snapshot
    }

    fn read_type(
        &self,
        class: TypeHandle,
        image: usize,
        classes: &mut IndexMap<TypeHandle, ClassName>,
    ) -> Option<RuntimeType> {
        let name = self.api.class_name(class).filter(|n| !n.is_empty())?;
        let namespace = self.api.class_namespace(class).unwrap_or_default();
        let flags = self.api.class_flags(class).unwrap_or_default();
        let is_valuetype = self.api.class_is_valuetype(class);
        let is_enum = self.api.class_is_enum(class);
        let is_interface = flags.is_interface();
        let declaring_type = self.api.class_declaring_type(class);
        self.note_class(class, classes, 0);

        let parent = self.api.class_parent(class);
        let kind = if parent.is_some_and(|p| self.is_delegate_base(p)) {
            TypeKind::Delegate
        } else if is_enum {
            TypeKind::Enum
        } else if is_interface {
            TypeKind::Interface
        } else if is_valuetype {
            TypeKind::Struct
        } else {
            TypeKind::Class
        };

        let base = match (kind, parent) {
            (TypeKind::Class, Some(p)) => Some(self.parent_ref(p, classes)),
            _ => None,
        };

        let methods = self.read_methods(class, classes);
        let fields = self.read_fields(class, classes);
        let properties = self.read_properties(class, &methods, classes);

        Some(RuntimeType {
            handle: class,
            image,
            name,
            namespace,
            kind,
            visibility: Visibility::of_type(flags),
            flags,
            is_valuetype,
            is_enum,
            is_interface,
            declaring_type,
            base,
            fields,
            properties,
            methods,
        })
    }

    fn is_delegate_base(&self, parent: TypeHandle) -> bool {
        let ns = self.api.class_namespace(parent);
        let name = self.api.class_name(parent);
        ns.as_deref() == Some("System") && matches!(name.as_deref(), Some("MulticastDelegate") | Some("Delegate"))
    }

    fn parent_ref(&self, parent: TypeHandle, classes: &mut IndexMap<TypeHandle, ClassName>) -> TypeRef {
        self.note_class(parent, classes, 0);
        match self.api.class_type(parent) {
            Some(ty) => self.type_ref(ty, classes, 0),
            None => TypeRef::class(parent),
        }
    }

    fn note_class(&self, class: TypeHandle, classes: &mut IndexMap<TypeHandle, ClassName>, depth: usize) {
        if classes.contains_key(&class) {
            return;
        }
        let declaring = self.api.class_declaring_type(class);
        classes.insert(
            class,
            ClassName {
                name: self.api.class_name(class).unwrap_or_default(),
                namespace: self.api.class_namespace(class).unwrap_or_default(),
                declaring,
            },
        );
        if let Some(outer) = declaring {
            if depth < MAX_DECLARING_DEPTH {
                self.note_class(outer, classes, depth + 1);
            }
        }
    }

    fn type_ref(&self, ty: TypeRefHandle, classes: &mut IndexMap<TypeHandle, ClassName>, depth: usize) -> TypeRef {
        if depth > MAX_TYPE_DEPTH {
            log::debug!("type reference {} nested too deeply", ty);
            return TypeRef::Unknown;
        }
        let Some(code) = self.api.type_code(ty) else {
            return TypeRef::Unknown;
        };
        if code.is_primitive() {
            return TypeRef::primitive(code);
        }

        match code {
            TypeCode::Class | TypeCode::ValueType => match self.api.type_class(ty) {
                Some(class) => {
                    self.note_class(class, classes, 0);
                    TypeRef::class(class)
                }
                None => TypeRef::Unknown,
            },
            TypeCode::SzArray | TypeCode::Array => {
                let element = self
                    .api
                    .type_element(ty)
                    .map(|e| self.type_ref(e, classes, depth + 1))
                    .unwrap_or(TypeRef::Unknown);
                let vector = code == TypeCode::SzArray;
                let rank = if vector { 1 } else { self.api.type_array_rank(ty).unwrap_or(1).max(1) };
                TypeRef::Array { element: Box::new(element), rank, vector }
            }
            TypeCode::GenericInst => {
                let Some(class) = self.api.type_class(ty) else {
                    return TypeRef::Unknown;
                };
                self.note_class(class, classes, 0);
                let args = self.api.type_generic_args(ty).map(|args| {
                    args.into_iter()
                        .map(|a| self.type_ref(a, classes, depth + 1))
                        .collect()
                });
                TypeRef::GenericInst { class, args }
            }
            TypeCode::Var | TypeCode::MVar => TypeRef::GenericParam {
                scope: if code == TypeCode::Var { GenericScope::Type } else { GenericScope::Method },
                index: self.api.type_generic_param_index(ty).unwrap_or(0),
            },
            TypeCode::Ptr => {
                let element = self
                    .api
                    .type_element(ty)
                    .map(|e| self.type_ref(e, classes, depth + 1))
                    .unwrap_or(TypeRef::Unknown);
                TypeRef::Pointer { element: Box::new(element) }
            }
            _ => TypeRef::Unknown,
        }
    }

    fn read_fields(&self, class: TypeHandle, classes: &mut IndexMap<TypeHandle, ClassName>) -> Vec<RuntimeField> {
        let mut fields = Vec::new();
        for handle in self.api.class_fields(class) {
            let Some(name) = self.api.field_name(handle) else {
                continue;
            };
            let flags = self.api.field_flags(handle).unwrap_or_default();
            let ty = self.api.field_type(handle).map(|t| self.type_ref(t, classes, 0));
            let constant = if flags.is_literal() { self.api.field_constant(handle) } else { None };
            fields.push(RuntimeField { handle, name, flags, ty, constant });
        }
        fields
    }

    fn read_methods(&self, class: TypeHandle, classes: &mut IndexMap<TypeHandle, ClassName>) -> Vec<RuntimeMethod> {
        let mut methods = Vec::new();
        for handle in self.api.class_methods(class) {
            let name = self.api.method_name(handle).unwrap_or_default();
            let flags = self.api.method_flags(handle).unwrap_or_default();
            let code_address = self.code_address(handle).and_then(Address::non_null);
            let return_type = self.api.method_return_type(handle).map(|t| self.type_ref(t, classes, 0));

            let count = self.api.method_param_count(handle);
            let mut params = Vec::with_capacity(count);
            for i in 0..count {
                let name = self.api.method_param_name(handle, i).filter(|n| !n.is_empty());
                let param = match self.api.method_param(handle, i) {
                    Some(ty) => RuntimeParam {
                        name,
                        ty: self.type_ref(ty, classes, 0),
                        by_ref: ByRefKind::from_attributes(
                            self.api.type_is_byref(ty),
                            self.api.type_param_attributes(ty),
                        ),
                    },
                    None => RuntimeParam { name, ty: TypeRef::Unknown, by_ref: ByRefKind::None },
                };
                params.push(param);
            }

            methods.push(RuntimeMethod {
                handle,
                name,
                flags,
                code_address,
                return_type,
                params,
                generic: self.generic_container(handle),
            });
        }
        methods
    }

    fn code_address(&self, method: MethodHandle) -> Option<Address> {
        self.api.method_code_address(method).or_else(|| {
            self.reader
                .as_ref()
                .and_then(|r| r.code_pointer(Address::new(method.raw())))
        })
    }

    fn generic_container(&self, method: MethodHandle) -> Option<GenericContainer> {
        self.api.method_generic_container(method).or_else(|| {
            let info = self.reader.as_ref()?.generic_container(Address::new(method.raw()))?;
            Some(GenericContainer {
                start: u32::try_from(info.generic_parameter_start).ok()?,
                count: u32::try_from(info.type_argc).ok()?,
            })
        })
    }

    fn read_properties(
        &self,
        class: TypeHandle,
        methods: &[RuntimeMethod],
        classes: &mut IndexMap<TypeHandle, ClassName>,
    ) -> Vec<RuntimeProperty> {
        let mut properties = Vec::new();
        for handle in self.api.class_properties(class) {
            let Some(name) = self.api.property_name(handle) else {
                continue;
            };
            let getter = self.api.property_getter(handle);
            let setter = self.api.property_setter(handle);

            let from_getter = getter.and_then(|g| match methods.iter().find(|m| m.handle == g) {
                Some(m) => m.return_type.clone(),
                None => self.api.method_return_type(g).map(|t| self.type_ref(t, classes, 0)),
            });
            let ty = from_getter.or_else(|| {
                let s = setter?;
                match methods.iter().find(|m| m.handle == s) {
                    Some(m) => m.params.first().map(|p| p.ty.clone()),
                    None => self.api.method_param(s, 0).map(|t| self.type_ref(t, classes, 0)),
                }
            });

            let flags = getter
                .and_then(|g| self.api.method_flags(g))
                .or_else(|| setter.and_then(|s| self.api.method_flags(s)))
                .unwrap_or_default();

            properties.push(RuntimeProperty { handle, name, getter, setter, ty, flags });
        }
        properties
    }
}
