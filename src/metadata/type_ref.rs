// Mon Feb 16 2026 - Alex

use crate::runtime::{TypeCode, TypeHandle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenericScope {
    Type,
    Method,
}

/// A type reference as captured from the runtime. Class names live in the
/// snapshot's class table and are looked up by handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive { code: TypeCode },
    Class { class: TypeHandle },
    /// `rank` is 1 for both vectors and single-dimension arrays; `vector` marks `T[]`.
    Array { element: Box<TypeRef>, rank: u32, vector: bool },
    /// `args` is `None` when the instantiation's arguments could not be read.
    GenericInst { class: TypeHandle, args: Option<Vec<TypeRef>> },
    GenericParam { scope: GenericScope, index: u32 },
    Pointer { element: Box<TypeRef> },
    Unknown,
}

impl TypeRef {
    pub fn primitive(code: TypeCode) -> Self {
        TypeRef::Primitive { code }
    }

    pub fn class(class: TypeHandle) -> Self {
        TypeRef::Class { class }
    }

    pub fn vector_of(element: TypeRef) -> Self {
        TypeRef::Array { element: Box::new(element), rank: 1, vector: true }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive { code: TypeCode::Void })
    }

    /// Class handle a reference names directly, if any.
    pub fn class_handle(&self) -> Option<TypeHandle> {
        match self {
            TypeRef::Class { class } | TypeRef::GenericInst { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Nesting depth of array and pointer wrappers.
    pub fn depth(&self) -> usize {
        match self {
            TypeRef::Array { element, .. } | TypeRef::Pointer { element } => 1 + element.depth(),
            _ => 0,
        }
    }
}
