// Mon Feb 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

// Handles are the runtime's own pointers, kept opaque. They are compared and
// hashed but never dereferenced by the core.
macro_rules! runtime_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn raw(&self) -> u64 {
                self.0
            }

            pub fn is_null(&self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}@0x{:x}", $label, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

runtime_handle!(AssemblyHandle, "assembly");
runtime_handle!(ImageHandle, "image");
runtime_handle!(
    /// A runtime class (`Il2CppClass*`).
    TypeHandle,
    "class"
);
runtime_handle!(FieldHandle, "field");
runtime_handle!(PropertyHandle, "property");
runtime_handle!(
    /// A method (`MethodInfo*`). Its raw value is the address of the method-info structure.
    MethodHandle,
    "method"
);
runtime_handle!(
    /// A type reference (`Il2CppType*`), as found on fields, parameters and return values.
    TypeRefHandle,
    "type"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        assert_eq!(MethodHandle::new(0x1f).to_string(), "method@0x1f");
        assert!(TypeHandle::new(0).is_null());
    }
}
