// Mon Feb 16 2026 - Alex

use crate::memory::Address;
use crate::metadata::{TypeKind, TypeRef, Visibility};
use crate::runtime::{
    FieldAttributes, FieldHandle, GenericContainer, ImageHandle, MethodAttributes, MethodHandle, ParamAttributes,
    PropertyHandle, TypeAttributes, TypeHandle,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub handle: ImageHandle,
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeType {
    pub handle: TypeHandle,
    /// Index into the snapshot's image list.
    pub image: usize,
    pub name: String,
    pub namespace: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub flags: TypeAttributes,
    pub is_valuetype: bool,
    pub is_enum: bool,
    pub is_interface: bool,
    pub declaring_type: Option<TypeHandle>,
    /// Base type, recorded for the class kind only.
    pub base: Option<TypeRef>,
    pub fields: Vec<RuntimeField>,
    pub properties: Vec<RuntimeProperty>,
    pub methods: Vec<RuntimeMethod>,
}

impl RuntimeType {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Generic definitions carry their arity after a backtick, e.g. ``List`1``.
    pub fn is_generic(&self) -> bool {
        self.name.contains('`')
    }

    pub fn is_static(&self) -> bool {
        self.flags.is_static()
    }

    pub fn method(&self, handle: MethodHandle) -> Option<&RuntimeMethod> {
        self.methods.iter().find(|m| m.handle == handle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeField {
    pub handle: FieldHandle,
    pub name: String,
    pub flags: FieldAttributes,
    pub ty: Option<TypeRef>,
    pub constant: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeProperty {
    pub handle: PropertyHandle,
    pub name: String,
    pub getter: Option<MethodHandle>,
    pub setter: Option<MethodHandle>,
    /// Getter return type, or the setter's first parameter.
    pub ty: Option<TypeRef>,
    /// Flags of the getter, or of the setter when there is no getter.
    pub flags: MethodAttributes,
}

impl RuntimeProperty {
    pub fn accessors(&self) -> impl Iterator<Item = MethodHandle> + '_ {
        self.getter.iter().chain(self.setter.iter()).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ByRefKind {
    #[default]
    None,
    In,
    Out,
    Ref,
}

impl ByRefKind {
    pub fn from_attributes(by_ref: bool, attrs: ParamAttributes) -> Self {
        if !by_ref {
            return ByRefKind::None;
        }
        let is_in = attrs.contains(ParamAttributes::IN);
        let is_out = attrs.contains(ParamAttributes::OUT);
        match (is_in, is_out) {
            (false, true) => ByRefKind::Out,
            (true, false) => ByRefKind::In,
            _ => ByRefKind::Ref,
        }
    }

    pub fn modifier(&self) -> Option<&'static str> {
        match self {
            ByRefKind::None => None,
            ByRefKind::In => Some("in"),
            ByRefKind::Out => Some("out"),
            ByRefKind::Ref => Some("ref"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeParam {
    pub name: Option<String>,
    pub ty: TypeRef,
    pub by_ref: ByRefKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeMethod {
    pub handle: MethodHandle,
    /// Empty when the runtime could not name the method.
    pub name: String,
    pub flags: MethodAttributes,
    /// `None` for methods without compiled code.
    pub code_address: Option<Address>,
    pub return_type: Option<TypeRef>,
    pub params: Vec<RuntimeParam>,
    pub generic: Option<GenericContainer>,
}

impl RuntimeMethod {
    pub fn is_constructor_like(&self) -> bool {
        matches!(self.name.as_str(), ".ctor" | ".cctor" | "Finalize")
    }

    pub fn is_static(&self) -> bool {
        self.flags.is_static()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_ref_kind() {
        assert_eq!(ByRefKind::from_attributes(false, ParamAttributes::OUT), ByRefKind::None);
        assert_eq!(ByRefKind::from_attributes(true, ParamAttributes::OUT), ByRefKind::Out);
        assert_eq!(ByRefKind::from_attributes(true, ParamAttributes::IN), ByRefKind::In);
        assert_eq!(ByRefKind::from_attributes(true, ParamAttributes::IN | ParamAttributes::OUT), ByRefKind::Ref);
        assert_eq!(ByRefKind::from_attributes(true, ParamAttributes::empty()), ByRefKind::Ref);
        assert_eq!(ByRefKind::Out.modifier(), Some("out"));
    }
}
