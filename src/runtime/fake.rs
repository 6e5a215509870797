// Mon Feb 16 2026 - Alex

//! In-memory runtime used by the test suites.

use crate::memory::Address;
use crate::runtime::{
    AssemblyHandle, BindingError, FieldAttributes, FieldHandle, GenericContainer, ImageHandle, MethodAttributes,
    MethodHandle, ParamAttributes, PropertyHandle, RuntimeApi, TypeAttributes, TypeCode, TypeHandle, TypeRefHandle,
};
use std::cell::Cell;
use std::collections::HashMap;

struct FakeImage {
    assembly: AssemblyHandle,
    handle: ImageHandle,
    name: String,
    classes: Vec<TypeHandle>,
}

struct FakeClass {
    name: Option<String>,
    namespace: String,
    flags: TypeAttributes,
    valuetype: bool,
    is_enum: bool,
    parent: Option<TypeHandle>,
    declaring: Option<TypeHandle>,
    ty: TypeRefHandle,
    fields: Vec<FieldHandle>,
    properties: Vec<PropertyHandle>,
    methods: Vec<MethodHandle>,
}

struct FakeField {
    name: Option<String>,
    flags: FieldAttributes,
    ty: TypeRefHandle,
    constant: Option<i64>,
}

struct FakeProperty {
    name: Option<String>,
    getter: Option<MethodHandle>,
    setter: Option<MethodHandle>,
}

struct FakeMethod {
    name: Option<String>,
    flags: MethodAttributes,
    ret: Option<TypeRefHandle>,
    params: Vec<(TypeRefHandle, Option<String>)>,
    code: Option<Address>,
    generic: Option<GenericContainer>,
}

#[derive(Clone)]
struct FakeType {
    code: TypeCode,
    byref: bool,
    attrs: ParamAttributes,
    class: Option<TypeHandle>,
    element: Option<TypeRefHandle>,
    rank: Option<u32>,
    args: Option<Vec<TypeRefHandle>>,
    param_index: Option<u32>,
}

impl FakeType {
    fn of(code: TypeCode) -> Self {
        Self {
            code,
            byref: false,
            attrs: ParamAttributes::empty(),
            class: None,
            element: None,
            rank: None,
            args: None,
            param_index: None,
        }
    }
}

pub struct FakeRuntime {
    next: u64,
    images: Vec<FakeImage>,
    classes: HashMap<TypeHandle, FakeClass>,
    fields: HashMap<FieldHandle, FakeField>,
    properties: HashMap<PropertyHandle, FakeProperty>,
    methods: HashMap<MethodHandle, FakeMethod>,
    types: HashMap<TypeRefHandle, FakeType>,
    primitives: HashMap<u8, TypeRefHandle>,
    missing: Vec<String>,
    attach_fails: bool,
    attach_calls: Cell<usize>,
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            next: 0x10_0000,
            images: Vec::new(),
            classes: HashMap::new(),
            fields: HashMap::new(),
            properties: HashMap::new(),
            methods: HashMap::new(),
            types: HashMap::new(),
            primitives: HashMap::new(),
            missing: Vec::new(),
            attach_fails: false,
            attach_calls: Cell::new(0),
        }
    }

    fn alloc(&mut self) -> u64 {
        self.next += 0x100;
        self.next
    }

    pub fn with_missing_export(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    pub fn with_attach_failure(mut self) -> Self {
        self.attach_fails = true;
        self
    }

    pub fn attach_calls(&self) -> usize {
        self.attach_calls.get()
    }

    pub fn add_image(&mut self, name: &str) -> ImageHandle {
        let assembly = AssemblyHandle::new(self.alloc());
        let handle = ImageHandle::new(self.alloc());
        self.images.push(FakeImage { assembly, handle, name: name.to_string(), classes: Vec::new() });
        handle
    }

    /// Adds a public class. The class gets its own `Class`-coded type reference.
    pub fn add_class(&mut self, image: ImageHandle, namespace: &str, name: &str) -> TypeHandle {
        let handle = TypeHandle::new(self.alloc());
        let ty = TypeRefHandle::new(self.alloc());
        let mut fake_ty = FakeType::of(TypeCode::Class);
        fake_ty.class = Some(handle);
        self.types.insert(ty, fake_ty);

        self.classes.insert(
            handle,
            FakeClass {
                name: Some(name.to_string()),
                namespace: namespace.to_string(),
                flags: TypeAttributes::PUBLIC,
                valuetype: false,
                is_enum: false,
                parent: None,
                declaring: None,
                ty,
                fields: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
            },
        );
        if let Some(img) = self.images.iter_mut().find(|i| i.handle == image) {
            img.classes.push(handle);
        }
        handle
    }

    /// A class whose name accessor fails.
    pub fn add_nameless_class(&mut self, image: ImageHandle) -> TypeHandle {
        let handle = self.add_class(image, "", "");
        if let Some(c) = self.classes.get_mut(&handle) {
            c.name = None;
        }
        handle
    }

    fn class_mut(&mut self, class: TypeHandle) -> &mut FakeClass {
        self.classes.get_mut(&class).expect("unknown fake class")
    }

    pub fn set_class_flags(&mut self, class: TypeHandle, flags: TypeAttributes) {
        self.class_mut(class).flags = flags;
    }

    pub fn set_valuetype(&mut self, class: TypeHandle) {
        let ty = {
            let c = self.class_mut(class);
            c.valuetype = true;
            c.ty
        };
        if let Some(t) = self.types.get_mut(&ty) {
            t.code = TypeCode::ValueType;
        }
    }

    pub fn set_enum(&mut self, class: TypeHandle) {
        self.set_valuetype(class);
        self.class_mut(class).is_enum = true;
    }

    pub fn set_parent(&mut self, class: TypeHandle, parent: TypeHandle) {
        self.class_mut(class).parent = Some(parent);
    }

    pub fn set_declaring(&mut self, class: TypeHandle, declaring: TypeHandle) {
        self.class_mut(class).declaring = Some(declaring);
    }

    pub fn set_type_code(&mut self, class: TypeHandle, code: TypeCode) {
        let ty = self.class_mut(class).ty;
        if let Some(t) = self.types.get_mut(&ty) {
            t.code = code;
        }
    }

    fn add_type(&mut self, ty: FakeType) -> TypeRefHandle {
        let handle = TypeRefHandle::new(self.alloc());
        self.types.insert(handle, ty);
        handle
    }

    pub fn prim(&mut self, code: TypeCode) -> TypeRefHandle {
        if let Some(&h) = self.primitives.get(&code.raw()) {
            return h;
        }
        let h = self.add_type(FakeType::of(code));
        self.primitives.insert(code.raw(), h);
        h
    }

    pub fn class_ref(&self, class: TypeHandle) -> TypeRefHandle {
        self.classes[&class].ty
    }

    pub fn array_of(&mut self, element: TypeRefHandle) -> TypeRefHandle {
        let mut ty = FakeType::of(TypeCode::SzArray);
        ty.element = Some(element);
        ty.rank = Some(1);
        self.add_type(ty)
    }

    pub fn md_array_of(&mut self, element: TypeRefHandle, rank: u32) -> TypeRefHandle {
        let mut ty = FakeType::of(TypeCode::Array);
        ty.element = Some(element);
        ty.rank = Some(rank);
        self.add_type(ty)
    }

    pub fn pointer_to(&mut self, element: TypeRefHandle) -> TypeRefHandle {
        let mut ty = FakeType::of(TypeCode::Ptr);
        ty.element = Some(element);
        self.add_type(ty)
    }

    pub fn generic_inst(&mut self, class: TypeHandle, args: Option<Vec<TypeRefHandle>>) -> TypeRefHandle {
        let mut ty = FakeType::of(TypeCode::GenericInst);
        ty.class = Some(class);
        ty.args = args;
        self.add_type(ty)
    }

    pub fn method_generic_param(&mut self, index: u32) -> TypeRefHandle {
        let mut ty = FakeType::of(TypeCode::MVar);
        ty.param_index = Some(index);
        self.add_type(ty)
    }

    pub fn type_generic_param(&mut self, index: u32) -> TypeRefHandle {
        let mut ty = FakeType::of(TypeCode::Var);
        ty.param_index = Some(index);
        self.add_type(ty)
    }

    pub fn byref(&mut self, ty: TypeRefHandle, attrs: ParamAttributes) -> TypeRefHandle {
        let mut copy = self.types[&ty].clone();
        copy.byref = true;
        copy.attrs = attrs;
        self.add_type(copy)
    }

    /// Adds a method returning `void`. A `code` of zero is a method without compiled code.
    pub fn add_method(&mut self, class: TypeHandle, name: &str, flags: MethodAttributes, code: u64) -> MethodHandle {
        let handle = MethodHandle::new(self.alloc());
        let void = self.prim(TypeCode::Void);
        self.methods.insert(
            handle,
            FakeMethod {
                name: Some(name.to_string()),
                flags,
                ret: Some(void),
                params: Vec::new(),
                code: Some(Address::new(code)),
                generic: None,
            },
        );
        self.class_mut(class).methods.push(handle);
        handle
    }

    fn method_mut(&mut self, method: MethodHandle) -> &mut FakeMethod {
        self.methods.get_mut(&method).expect("unknown fake method")
    }

    pub fn set_return(&mut self, method: MethodHandle, ty: TypeRefHandle) {
        self.method_mut(method).ret = Some(ty);
    }

    pub fn add_param(&mut self, method: MethodHandle, name: &str, ty: TypeRefHandle) {
        self.method_mut(method).params.push((ty, Some(name.to_string())));
    }

    pub fn add_unnamed_param(&mut self, method: MethodHandle, ty: TypeRefHandle) {
        self.method_mut(method).params.push((ty, None));
    }

    pub fn set_unknown_code_address(&mut self, method: MethodHandle) {
        self.method_mut(method).code = None;
    }

    pub fn set_generic_container(&mut self, method: MethodHandle, start: u32, count: u32) {
        self.method_mut(method).generic = Some(GenericContainer { start, count });
    }

    pub fn add_field(&mut self, class: TypeHandle, name: &str, flags: FieldAttributes, ty: TypeRefHandle) -> FieldHandle {
        let handle = FieldHandle::new(self.alloc());
        self.fields.insert(handle, FakeField { name: Some(name.to_string()), flags, ty, constant: None });
        self.class_mut(class).fields.push(handle);
        handle
    }

    pub fn set_constant(&mut self, field: FieldHandle, value: i64) {
        if let Some(f) = self.fields.get_mut(&field) {
            f.constant = Some(value);
        }
    }

    pub fn add_property(
        &mut self,
        class: TypeHandle,
        name: &str,
        getter: Option<MethodHandle>,
        setter: Option<MethodHandle>,
    ) -> PropertyHandle {
        let handle = PropertyHandle::new(self.alloc());
        self.properties.insert(handle, FakeProperty { name: Some(name.to_string()), getter, setter });
        self.class_mut(class).properties.push(handle);
        handle
    }
}

impl RuntimeApi for FakeRuntime {
    fn verify_bindings(&self) -> Result<(), BindingError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(BindingError::MissingExports(self.missing.clone()))
        }
    }

    fn attach_current_thread(&self) -> Result<(), BindingError> {
        self.attach_calls.set(self.attach_calls.get() + 1);
        if self.attach_fails {
            Err(BindingError::AttachFailed("fake runtime refuses to attach".to_string()))
        } else {
            Ok(())
        }
    }

    fn domain_assemblies(&self) -> Vec<AssemblyHandle> {
        self.images.iter().map(|i| i.assembly).collect()
    }

    fn assembly_image(&self, assembly: AssemblyHandle) -> Option<ImageHandle> {
        self.images.iter().find(|i| i.assembly == assembly).map(|i| i.handle)
    }

    fn image_name(&self, image: ImageHandle) -> Option<String> {
        self.images.iter().find(|i| i.handle == image).map(|i| i.name.clone())
    }

    fn image_class_count(&self, image: ImageHandle) -> usize {
        self.images.iter().find(|i| i.handle == image).map_or(0, |i| i.classes.len())
    }

    fn image_class(&self, image: ImageHandle, index: usize) -> Option<TypeHandle> {
        self.images.iter().find(|i| i.handle == image)?.classes.get(index).copied()
    }

    fn class_name(&self, class: TypeHandle) -> Option<String> {
        self.classes.get(&class)?.name.clone()
    }

    fn class_namespace(&self, class: TypeHandle) -> Option<String> {
        self.classes.get(&class).map(|c| c.namespace.clone())
    }

    fn class_flags(&self, class: TypeHandle) -> Option<TypeAttributes> {
        self.classes.get(&class).map(|c| c.flags)
    }

    fn class_is_valuetype(&self, class: TypeHandle) -> bool {
        self.classes.get(&class).is_some_and(|c| c.valuetype)
    }

    fn class_is_enum(&self, class: TypeHandle) -> bool {
        self.classes.get(&class).is_some_and(|c| c.is_enum)
    }

    fn class_parent(&self, class: TypeHandle) -> Option<TypeHandle> {
        self.classes.get(&class)?.parent
    }

    fn class_declaring_type(&self, class: TypeHandle) -> Option<TypeHandle> {
        self.classes.get(&class)?.declaring
    }

    fn class_type(&self, class: TypeHandle) -> Option<TypeRefHandle> {
        self.classes.get(&class).map(|c| c.ty)
    }

    fn class_fields(&self, class: TypeHandle) -> Vec<FieldHandle> {
        self.classes.get(&class).map(|c| c.fields.clone()).unwrap_or_default()
    }

    fn class_properties(&self, class: TypeHandle) -> Vec<PropertyHandle> {
        self.classes.get(&class).map(|c| c.properties.clone()).unwrap_or_default()
    }

    fn class_methods(&self, class: TypeHandle) -> Vec<MethodHandle> {
        self.classes.get(&class).map(|c| c.methods.clone()).unwrap_or_default()
    }

    fn field_name(&self, field: FieldHandle) -> Option<String> {
        self.fields.get(&field)?.name.clone()
    }

    fn field_flags(&self, field: FieldHandle) -> Option<FieldAttributes> {
        self.fields.get(&field).map(|f| f.flags)
    }

    fn field_type(&self, field: FieldHandle) -> Option<TypeRefHandle> {
        self.fields.get(&field).map(|f| f.ty)
    }

    fn field_constant(&self, field: FieldHandle) -> Option<i64> {
        self.fields.get(&field)?.constant
    }

    fn property_name(&self, property: PropertyHandle) -> Option<String> {
        self.properties.get(&property)?.name.clone()
    }

    fn property_getter(&self, property: PropertyHandle) -> Option<MethodHandle> {
        self.properties.get(&property)?.getter
    }

    fn property_setter(&self, property: PropertyHandle) -> Option<MethodHandle> {
        self.properties.get(&property)?.setter
    }

    fn method_name(&self, method: MethodHandle) -> Option<String> {
        self.methods.get(&method)?.name.clone()
    }

    fn method_flags(&self, method: MethodHandle) -> Option<MethodAttributes> {
        self.methods.get(&method).map(|m| m.flags)
    }

    fn method_return_type(&self, method: MethodHandle) -> Option<TypeRefHandle> {
        self.methods.get(&method)?.ret
    }

    fn method_param_count(&self, method: MethodHandle) -> usize {
        self.methods.get(&method).map_or(0, |m| m.params.len())
    }

    fn method_param(&self, method: MethodHandle, index: usize) -> Option<TypeRefHandle> {
        self.methods.get(&method)?.params.get(index).map(|p| p.0)
    }

    fn method_param_name(&self, method: MethodHandle, index: usize) -> Option<String> {
        self.methods.get(&method)?.params.get(index)?.1.clone()
    }

    fn method_code_address(&self, method: MethodHandle) -> Option<Address> {
        self.methods.get(&method)?.code
    }

    fn method_generic_container(&self, method: MethodHandle) -> Option<GenericContainer> {
        self.methods.get(&method)?.generic
    }

    fn type_code(&self, ty: TypeRefHandle) -> Option<TypeCode> {
        self.types.get(&ty).map(|t| t.code)
    }

    fn type_is_byref(&self, ty: TypeRefHandle) -> bool {
        self.types.get(&ty).is_some_and(|t| t.byref)
    }

    fn type_param_attributes(&self, ty: TypeRefHandle) -> ParamAttributes {
        self.types.get(&ty).map(|t| t.attrs).unwrap_or_default()
    }

    fn type_class(&self, ty: TypeRefHandle) -> Option<TypeHandle> {
        self.types.get(&ty)?.class
    }

    fn type_element(&self, ty: TypeRefHandle) -> Option<TypeRefHandle> {
        self.types.get(&ty)?.element
    }

    fn type_array_rank(&self, ty: TypeRefHandle) -> Option<u32> {
        self.types.get(&ty)?.rank
    }

    fn type_generic_args(&self, ty: TypeRefHandle) -> Option<Vec<TypeRefHandle>> {
        self.types.get(&ty)?.args.clone()
    }

    fn type_generic_param_index(&self, ty: TypeRefHandle) -> Option<u32> {
        self.types.get(&ty)?.param_index
    }
}
