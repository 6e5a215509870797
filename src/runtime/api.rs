// Mon Feb 16 2026 - Alex

use crate::memory::Address;
use crate::runtime::{
    AssemblyHandle, BindingError, FieldAttributes, FieldHandle, ImageHandle, MethodAttributes, MethodHandle,
    ParamAttributes, PropertyHandle, TypeAttributes, TypeCode, TypeHandle, TypeRefHandle,
};
use serde::{Deserialize, Serialize};

/// Generic parameter container of a generic method definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericContainer {
    /// Runtime-global index of the first generic parameter.
    pub start: u32,
    pub count: u32,
}

/// Introspection surface of the host runtime.
///
/// Every accessor may fail on a given item; failures come back as `None` or an
/// empty list and the caller decides whether to skip or erase the item.
/// Only [`RuntimeApi::verify_bindings`] and [`RuntimeApi::attach_current_thread`]
/// report hard errors.
pub trait RuntimeApi {
    fn verify_bindings(&self) -> Result<(), BindingError>;
    fn attach_current_thread(&self) -> Result<(), BindingError>;

    fn domain_assemblies(&self) -> Vec<AssemblyHandle>;
    fn assembly_image(&self, assembly: AssemblyHandle) -> Option<ImageHandle>;
    fn image_name(&self, image: ImageHandle) -> Option<String>;
    fn image_class_count(&self, image: ImageHandle) -> usize;
    fn image_class(&self, image: ImageHandle, index: usize) -> Option<TypeHandle>;

    fn class_name(&self, class: TypeHandle) -> Option<String>;
    fn class_namespace(&self, class: TypeHandle) -> Option<String>;
    fn class_flags(&self, class: TypeHandle) -> Option<TypeAttributes>;
    fn class_is_valuetype(&self, class: TypeHandle) -> bool;
    fn class_is_enum(&self, class: TypeHandle) -> bool;
    fn class_parent(&self, class: TypeHandle) -> Option<TypeHandle>;
    fn class_declaring_type(&self, class: TypeHandle) -> Option<TypeHandle>;
    fn class_type(&self, class: TypeHandle) -> Option<TypeRefHandle>;
    fn class_fields(&self, class: TypeHandle) -> Vec<FieldHandle>;
    fn class_properties(&self, class: TypeHandle) -> Vec<PropertyHandle>;
    fn class_methods(&self, class: TypeHandle) -> Vec<MethodHandle>;

    fn field_name(&self, field: FieldHandle) -> Option<String>;
    fn field_flags(&self, field: FieldHandle) -> Option<FieldAttributes>;
    fn field_type(&self, field: FieldHandle) -> Option<TypeRefHandle>;
    /// Constant value of a literal field, widened to 64 bits.
    fn field_constant(&self, field: FieldHandle) -> Option<i64>;

    fn property_name(&self, property: PropertyHandle) -> Option<String>;
    fn property_getter(&self, property: PropertyHandle) -> Option<MethodHandle>;
    fn property_setter(&self, property: PropertyHandle) -> Option<MethodHandle>;

    fn method_name(&self, method: MethodHandle) -> Option<String>;
    fn method_flags(&self, method: MethodHandle) -> Option<MethodAttributes>;
    fn method_return_type(&self, method: MethodHandle) -> Option<TypeRefHandle>;
    fn method_param_count(&self, method: MethodHandle) -> usize;
    fn method_param(&self, method: MethodHandle, index: usize) -> Option<TypeRefHandle>;
    fn method_param_name(&self, method: MethodHandle, index: usize) -> Option<String>;
    /// `Some(Address::zero())` is a method without compiled code; `None` means unknown.
    fn method_code_address(&self, method: MethodHandle) -> Option<Address>;
    fn method_generic_container(&self, method: MethodHandle) -> Option<GenericContainer>;

    fn type_code(&self, ty: TypeRefHandle) -> Option<TypeCode>;
    fn type_is_byref(&self, ty: TypeRefHandle) -> bool;
    fn type_param_attributes(&self, ty: TypeRefHandle) -> ParamAttributes;
    fn type_class(&self, ty: TypeRefHandle) -> Option<TypeHandle>;
    /// Element type of an array or pointer reference.
    fn type_element(&self, ty: TypeRefHandle) -> Option<TypeRefHandle>;
    /// Rank of a multi-dimensional array; single-dimension vectors report 1.
    fn type_array_rank(&self, ty: TypeRefHandle) -> Option<u32>;
    /// Actual arguments of a generic instantiation, when the context chain is readable.
    fn type_generic_args(&self, ty: TypeRefHandle) -> Option<Vec<TypeRefHandle>>;
    fn type_generic_param_index(&self, ty: TypeRefHandle) -> Option<u32>;
}
