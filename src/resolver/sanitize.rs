// Mon Feb 16 2026 - Alex

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub fn is_csharp_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

fn is_separator(c: char) -> bool {
    matches!(c, '<' | '>' | '.' | '|')
}

/// Turns a raw runtime name into a C# identifier.
///
/// Returns `None` for constructors and for names that still contain anything
/// other than ASCII letters, digits and `_` once `<>.|` are set aside.
pub fn sanitize_identifier(name: &str) -> Option<String> {
    if name.is_empty() || name == ".ctor" || name == ".cctor" {
        return None;
    }
    let valid = name
        .chars()
        .filter(|&c| !is_separator(c))
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid || name.chars().all(is_separator) {
        return None;
    }

    let mut out: String = name.chars().map(|c| if is_separator(c) { '_' } else { c }).collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_csharp_keyword(&out) {
        out.insert(0, '@');
    }
    Some(out)
}

/// Each dot-separated part becomes a valid identifier; unusable characters turn into `_`.
pub fn sanitize_namespace(namespace: &str) -> String {
    if namespace.is_empty() {
        return String::new();
    }
    namespace
        .split('.')
        .map(|part| {
            let mut cleaned: String = part
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
                .collect();
            if cleaned.is_empty() || cleaned.starts_with(|c: char| c.is_ascii_digit()) {
                cleaned.insert(0, '_');
            }
            if is_csharp_keyword(&cleaned) {
                cleaned.insert(0, '@');
            }
            cleaned
        })
        .collect::<Vec<_>>()
        .join(".")
}
