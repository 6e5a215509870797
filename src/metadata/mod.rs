// Mon Feb 16 2026 - Alex

pub mod enumerator;
pub mod error;
pub mod kind;
pub mod model;
pub mod registry;
pub mod snapshot;
pub mod type_ref;

pub use enumerator::MetadataEnumerator;
pub use error::MetadataError;
pub use kind::{TypeKind, Visibility};
pub use model::{ByRefKind, ImageInfo, RuntimeField, RuntimeMethod, RuntimeParam, RuntimeProperty, RuntimeType};
pub use registry::KnownTypeRegistry;
pub use snapshot::{ClassName, MetadataSnapshot};
pub use type_ref::{GenericScope, TypeRef};
