// Mon Feb 16 2026 - Alex

use serde::{Deserialize, Serialize};

/// Element type tag of a runtime type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCode {
    End,
    Void,
    Boolean,
    Char,
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    R4,
    R8,
    String,
    Ptr,
    ByRef,
    ValueType,
    Class,
    Var,
    Array,
    GenericInst,
    TypedByRef,
    I,
    U,
    FnPtr,
    Object,
    SzArray,
    MVar,
    Other(u8),
}

impl TypeCode {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0x00 => TypeCode::End,
            0x01 => TypeCode::Void,
            0x02 => TypeCode::Boolean,
            0x03 => TypeCode::Char,
            0x04 => TypeCode::I1,
            0x05 => TypeCode::U1,
            0x06 => TypeCode::I2,
            0x07 => TypeCode::U2,
            0x08 => TypeCode::I4,
            0x09 => TypeCode::U4,
            0x0a => TypeCode::I8,
            0x0b => TypeCode::U8,
            0x0c => TypeCode::R4,
            0x0d => TypeCode::R8,
            0x0e => TypeCode::String,
            0x0f => TypeCode::Ptr,
            0x10 => TypeCode::ByRef,
            0x11 => TypeCode::ValueType,
            0x12 => TypeCode::Class,
            0x13 => TypeCode::Var,
            0x14 => TypeCode::Array,
            0x15 => TypeCode::GenericInst,
            0x16 => TypeCode::TypedByRef,
            0x18 => TypeCode::I,
            0x19 => TypeCode::U,
            0x1b => TypeCode::FnPtr,
            0x1c => TypeCode::Object,
            0x1d => TypeCode::SzArray,
            0x1e => TypeCode::MVar,
            other => TypeCode::Other(other),
        }
    }

    pub fn raw(&self) -> u8 {
        match self {
            TypeCode::End => 0x00,
            TypeCode::Void => 0x01,
            TypeCode::Boolean => 0x02,
            TypeCode::Char => 0x03,
            TypeCode::I1 => 0x04,
            TypeCode::U1 => 0x05,
            TypeCode::I2 => 0x06,
            TypeCode::U2 => 0x07,
            TypeCode::I4 => 0x08,
            TypeCode::U4 => 0x09,
            TypeCode::I8 => 0x0a,
            TypeCode::U8 => 0x0b,
            TypeCode::R4 => 0x0c,
            TypeCode::R8 => 0x0d,
            TypeCode::String => 0x0e,
            TypeCode::Ptr => 0x0f,
            TypeCode::ByRef => 0x10,
            TypeCode::ValueType => 0x11,
            TypeCode::Class => 0x12,
            TypeCode::Var => 0x13,
            TypeCode::Array => 0x14,
            TypeCode::GenericInst => 0x15,
            TypeCode::TypedByRef => 0x16,
            TypeCode::I => 0x18,
            TypeCode::U => 0x19,
            TypeCode::FnPtr => 0x1b,
            TypeCode::Object => 0x1c,
            TypeCode::SzArray => 0x1d,
            TypeCode::MVar => 0x1e,
            TypeCode::Other(raw) => *raw,
        }
    }

    /// C# keyword for primitive codes, `None` for everything else.
    pub fn keyword(&self) -> Option<&'static str> {
        let keyword = match self {
            TypeCode::Void => "void",
            TypeCode::Boolean => "bool",
            TypeCode::Char => "char",
            TypeCode::I1 => "sbyte",
            TypeCode::U1 => "byte",
            TypeCode::I2 => "short",
            TypeCode::U2 => "ushort",
            TypeCode::I4 => "int",
            TypeCode::U4 => "uint",
            TypeCode::I8 => "long",
            TypeCode::U8 => "ulong",
            TypeCode::R4 => "float",
            TypeCode::R8 => "double",
            TypeCode::String => "string",
            TypeCode::Object => "object",
            TypeCode::I => "IntPtr",
            TypeCode::U => "UIntPtr",
            _ => return None,
        };
        Some(keyword)
    }

    pub fn is_primitive(&self) -> bool {
        self.keyword().is_some()
    }
}
