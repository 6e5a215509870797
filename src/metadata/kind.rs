// Mon Feb 16 2026 - Alex

use crate::runtime::{FieldAttributes, MethodAttributes, TypeAttributes};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration kind. The derived order is the emission order inside a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Delegate,
    Enum,
    Interface,
    Struct,
    Class,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Delegate => "delegate",
            TypeKind::Enum => "enum",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Class => "class",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Internal,
    Private,
    Protected,
    ProtectedInternal,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::ProtectedInternal => "protected internal",
        }
    }

    pub fn of_type(flags: TypeAttributes) -> Self {
        match flags.visibility() {
            0x1 | 0x2 => Visibility::Public,
            0x3 => Visibility::Private,
            0x4 => Visibility::Protected,
            0x7 => Visibility::ProtectedInternal,
            _ => Visibility::Internal,
        }
    }

    pub fn of_method(flags: MethodAttributes) -> Self {
        Self::of_member_access(flags.access())
    }

    pub fn of_field(flags: FieldAttributes) -> Self {
        Self::of_member_access(flags.access())
    }

    // Methods and fields share the same access encoding.
    fn of_member_access(access: u32) -> Self {
        match access {
            0x6 => Visibility::Public,
            0x4 => Visibility::Protected,
            0x2 | 0x3 => Visibility::Internal,
            0x5 => Visibility::ProtectedInternal,
            _ => Visibility::Private,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
