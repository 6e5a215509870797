// Mon Feb 16 2026 - Alex

pub mod generics;
pub mod namespace;
pub mod resolver;
pub mod sanitize;

pub use generics::{known_generic, GenericMapping};
pub use namespace::{effective_namespace, recover_namespace, NamespacePolicy, GLOBAL_NAMESPACE};
pub use resolver::{ResolveContext, ResolvedType, TypeResolver};
pub use sanitize::{is_csharp_keyword, sanitize_identifier, sanitize_namespace};
