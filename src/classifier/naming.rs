// Mon Feb 16 2026 - Alex

use crate::metadata::{MetadataSnapshot, RuntimeMethod, TypeRef};

const OBFUSCATED_NAME_LEN: usize = 11;

/// The obfuscator names its noise with exactly eleven uppercase ASCII letters.
pub fn is_obfuscated_name(name: &str) -> bool {
    name.len() == OBFUSCATED_NAME_LEN && name.bytes().all(|b| b.is_ascii_uppercase())
}

fn raw_type_name(snapshot: &MetadataSnapshot, ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive { code } => code.keyword().map(str::to_string).unwrap_or_else(|| "?".to_string()),
        TypeRef::Class { class } | TypeRef::GenericInst { class, .. } => snapshot
            .class_name(*class)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "?".to_string()),
        TypeRef::Array { element, .. } => format!("{}[]", raw_type_name(snapshot, element)),
        TypeRef::Pointer { element } => format!("{}*", raw_type_name(snapshot, element)),
        TypeRef::GenericParam { .. } => "T".to_string(),
        TypeRef::Unknown => "?".to_string(),
    }
}

/// `Ret Owner::Name(Type name, ...)` using raw runtime names.
pub fn raw_signature(snapshot: &MetadataSnapshot, owner: &str, method: &RuntimeMethod) -> String {
    let ret = method
        .return_type
        .as_ref()
        .map(|t| raw_type_name(snapshot, t))
        .unwrap_or_else(|| "void".to_string());
    let name = if method.name.is_empty() { "???" } else { method.name.as_str() };
    let params = method
        .params
        .iter()
        .map(|p| match p.name.as_deref() {
            Some(n) if !n.is_empty() => format!("{} {}", raw_type_name(snapshot, &p.ty), n),
            _ => raw_type_name(snapshot, &p.ty),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {}::{}({})", ret, owner, name, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obfuscated_name_pattern() {
        assert!(is_obfuscated_name("AJLPLCGICMF"));
        assert!(is_obfuscated_name("KLFGNILMCJN"));
        assert!(!is_obfuscated_name("AJLPLCGICM"));
        assert!(!is_obfuscated_name("AJLPLCGICMFX"));
        assert!(!is_obfuscated_name("AJLPLCGICMf"));
        assert!(!is_obfuscated_name("AJLPLCGIC1F"));
        assert!(!is_obfuscated_name("Update"));
        assert!(!is_obfuscated_name(""));
        assert!(!is_obfuscated_name("ÄJLPLCGICM"));
    }
}
