// Mon Feb 16 2026 - Alex

use bitflags::bitflags;

pub const TYPE_VISIBILITY_MASK: u32 = 0x0007;
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
pub const FIELD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    /// Runtime type attributes. The low three bits hold the visibility and are
    /// read with [`TypeAttributes::visibility`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct TypeAttributes: u32 {
        const PUBLIC = 0x0001;
        const NESTED_PUBLIC = 0x0002;
        const NESTED_PRIVATE = 0x0003;
        const NESTED_FAMILY = 0x0004;
        const NESTED_ASSEMBLY = 0x0005;
        const NESTED_FAM_AND_ASSEM = 0x0006;
        const NESTED_FAM_OR_ASSEM = 0x0007;
        const INTERFACE = 0x0020;
        const ABSTRACT = 0x0080;
        const SEALED = 0x0100;
        const SPECIAL_NAME = 0x0400;
        const SERIALIZABLE = 0x2000;
    }
}

impl TypeAttributes {
    pub fn visibility(&self) -> u32 {
        self.bits() & TYPE_VISIBILITY_MASK
    }

    pub fn is_interface(&self) -> bool {
        self.bits() & Self::INTERFACE.bits() != 0
    }

    pub fn is_abstract(&self) -> bool {
        self.bits() & Self::ABSTRACT.bits() != 0
    }

    pub fn is_sealed(&self) -> bool {
        self.bits() & Self::SEALED.bits() != 0
    }

    /// `abstract sealed` is how static classes are encoded.
    pub fn is_static(&self) -> bool {
        self.is_abstract() && self.is_sealed()
    }

    pub fn is_publicly_visible(&self) -> bool {
        matches!(self.visibility(), 0x1 | 0x2)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct MethodAttributes: u32 {
        const PRIVATE = 0x0001;
        const FAM_AND_ASSEM = 0x0002;
        const ASSEM = 0x0003;
        const FAMILY = 0x0004;
        const FAM_OR_ASSEM = 0x0005;
        const PUBLIC = 0x0006;
        const STATIC = 0x0010;
        const FINAL = 0x0020;
        const VIRTUAL = 0x0040;
        const HIDE_BY_SIG = 0x0080;
        const ABSTRACT = 0x0400;
        const SPECIAL_NAME = 0x0800;
        const RT_SPECIAL_NAME = 0x1000;
    }
}

impl MethodAttributes {
    pub fn access(&self) -> u32 {
        self.bits() & METHOD_ACCESS_MASK
    }

    pub fn is_static(&self) -> bool {
        self.bits() & Self::STATIC.bits() != 0
    }

    pub fn is_virtual(&self) -> bool {
        self.bits() & Self::VIRTUAL.bits() != 0
    }

    pub fn is_abstract(&self) -> bool {
        self.bits() & Self::ABSTRACT.bits() != 0
    }

    pub fn is_special_name(&self) -> bool {
        self.bits() & Self::SPECIAL_NAME.bits() != 0
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct FieldAttributes: u32 {
        const PRIVATE = 0x0001;
        const FAM_AND_ASSEM = 0x0002;
        const ASSEMBLY = 0x0003;
        const FAMILY = 0x0004;
        const FAM_OR_ASSEM = 0x0005;
        const PUBLIC = 0x0006;
        const STATIC = 0x0010;
        const INIT_ONLY = 0x0020;
        const LITERAL = 0x0040;
        const NOT_SERIALIZED = 0x0080;
        const SPECIAL_NAME = 0x0200;
        const HAS_DEFAULT = 0x8000;
    }
}

impl FieldAttributes {
    pub fn access(&self) -> u32 {
        self.bits() & FIELD_ACCESS_MASK
    }

    /// Access bits of zero.
    pub fn is_compiler_controlled(&self) -> bool {
        self.access() == 0
    }

    pub fn is_static(&self) -> bool {
        self.bits() & Self::STATIC.bits() != 0
    }

    pub fn is_literal(&self) -> bool {
        self.bits() & Self::LITERAL.bits() != 0
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct ParamAttributes: u32 {
        const IN = 0x0001;
        const OUT = 0x0002;
        const OPTIONAL = 0x0010;
        const HAS_DEFAULT = 0x1000;
    }
}
