// Mon Feb 16 2026 - Alex

pub mod api;
pub mod attach;
pub mod binding;
pub mod error;
pub mod flags;
pub mod handles;
pub mod type_code;

#[cfg(test)]
pub mod fake;

pub use api::{GenericContainer, RuntimeApi};
pub use attach::{ensure_attached, is_attached};
pub use binding::{ExportResolution, ExportTable, ResolutionMethod, REQUIRED_EXPORTS};
pub use error::BindingError;
pub use flags::{FieldAttributes, MethodAttributes, ParamAttributes, TypeAttributes};
pub use handles::{AssemblyHandle, FieldHandle, ImageHandle, MethodHandle, PropertyHandle, TypeHandle, TypeRefHandle};
pub use type_code::TypeCode;
