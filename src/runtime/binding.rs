// Mon Feb 16 2026 - Alex

use crate::runtime::BindingError;
use goblin::mach::Mach;
use goblin::Object;
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;

/// Exports a dump cannot run without.
pub const REQUIRED_EXPORTS: &[&str] = &[
    "il2cpp_domain_get",
    "il2cpp_domain_get_assemblies",
    "il2cpp_thread_attach",
    "il2cpp_assembly_get_image",
    "il2cpp_image_get_name",
    "il2cpp_image_get_class_count",
    "il2cpp_image_get_class",
    "il2cpp_class_get_type",
    "il2cpp_class_from_type",
    "il2cpp_class_get_name",
    "il2cpp_class_get_namespace",
    "il2cpp_class_get_flags",
    "il2cpp_class_get_methods",
    "il2cpp_method_get_name",
    "il2cpp_method_get_flags",
];

/// Exports that improve the dump but whose absence only degrades it.
pub const OPTIONAL_EXPORTS: &[&str] = &[
    "il2cpp_class_is_valuetype",
    "il2cpp_class_is_enum",
    "il2cpp_class_get_parent",
    "il2cpp_class_get_declaring_type",
    "il2cpp_class_get_fields",
    "il2cpp_class_get_properties",
    "il2cpp_field_get_flags",
    "il2cpp_field_get_type",
    "il2cpp_field_get_name",
    "il2cpp_field_static_get_value",
    "il2cpp_property_get_get_method",
    "il2cpp_property_get_set_method",
    "il2cpp_property_get_name",
    "il2cpp_method_get_return_type",
    "il2cpp_method_get_param",
    "il2cpp_method_get_param_count",
    "il2cpp_method_get_param_name",
    "il2cpp_type_is_byref",
];

/// Renamed-export suffixes and the tail of the export they stand in for.
pub const DEFAULT_SUFFIX_FALLBACKS: &[(&str, &str)] = &[("_wasting_your_life", "_domain_get_assemblies")];

const EXPORT_PREFIX: &str = "il2cpp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMethod {
    Exact,
    SuffixMatch,
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMethod::Exact => write!(f, "Exact"),
            ResolutionMethod::SuffixMatch => write!(f, "SuffixMatch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResolution {
    pub requested: String,
    pub resolved: String,
    pub rva: u64,
    pub method: ResolutionMethod,
}

impl fmt::Display for ExportResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} @ 0x{:x} [{}]", self.requested, self.resolved, self.rva, self.method)
    }
}

/// Export names of a host binary, with fallback for exports the vendor renamed.
#[derive(Debug, Clone, Default)]
pub struct ExportTable {
    exports: IndexMap<String, u64>,
    suffixes: Vec<(String, String)>,
}

impl ExportTable {
    pub fn new() -> Self {
        Self {
            exports: IndexMap::new(),
            suffixes: DEFAULT_SUFFIX_FALLBACKS
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, rva) in names {
            table.exports.insert(name.into(), rva);
        }
        table
    }

    pub fn from_file(path: &Path) -> Result<Self, BindingError> {
        let data = std::fs::read(path).map_err(|source| BindingError::HostUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    pub fn parse(data: &[u8]) -> Result<Self, BindingError> {
        let mut table = Self::new();

        match Object::parse(data)? {
            Object::PE(pe) => {
                for export in &pe.exports {
                    if let Some(name) = export.name {
                        table.exports.insert(name.to_string(), export.rva as u64);
                    }
                }
            }
            Object::Elf(elf) => {
                for sym in elf.dynsyms.iter() {
                    if sym.is_import() || sym.st_type() != goblin::elf::sym::STT_FUNC {
                        continue;
                    }
                    if let Some(name) = elf.dynstrtab.get_at(sym.st_name) {
                        table.exports.insert(name.to_string(), sym.st_value);
                    }
                }
            }
            Object::Mach(Mach::Binary(macho)) => {
                for export in macho.exports()? {
                    let name = export.name.strip_prefix('_').unwrap_or(&export.name);
                    table.exports.insert(name.to_string(), export.offset);
                }
            }
            Object::Mach(Mach::Fat(_)) => {
                return Err(BindingError::UnsupportedFormat("fat Mach-O".to_string()));
            }
            _ => return Err(BindingError::UnsupportedFormat("unknown object format".to_string())),
        }

        log::debug!("loaded {} exports from host binary", table.exports.len());
        Ok(table)
    }

    pub fn with_suffix_fallback(mut self, suffix: &str, original_tail: &str) -> Self {
        self.suffixes.push((suffix.to_string(), original_tail.to_string()));
        self
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }

    /// Exact name first, then any export carrying a known rename suffix for it.
    pub fn resolve(&self, name: &str) -> Option<ExportResolution> {
        if let Some(&rva) = self.exports.get(name) {
            log::trace!("{} resolved exactly", name);
            return Some(ExportResolution {
                requested: name.to_string(),
                resolved: name.to_string(),
                rva,
                method: ResolutionMethod::Exact,
            });
        }

        for (suffix, tail) in &self.suffixes {
            if format!("{}{}", EXPORT_PREFIX, tail) != name {
                continue;
            }
            let found = self
                .exports
                .iter()
                .find(|(export, _)| export.len() > suffix.len() && export.ends_with(suffix.as_str()));
            if let Some((export, &rva)) = found {
                log::info!("{} resolved through renamed export {}", name, export);
                return Some(ExportResolution {
                    requested: name.to_string(),
                    resolved: export.clone(),
                    rva,
                    method: ResolutionMethod::SuffixMatch,
                });
            }
        }
        None
    }

    /// Resolves every name, failing with the full list of the ones that are missing.
    pub fn resolve_all(&self, names: &[&str]) -> Result<Vec<ExportResolution>, BindingError> {
        let mut resolved = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            match self.resolve(name) {
                Some(r) => resolved.push(r),
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(BindingError::MissingExports(missing))
        }
    }

    /// Required exports must all resolve; optional ones are logged when absent.
    pub fn verify(&self) -> Result<Vec<ExportResolution>, BindingError> {
        let mut resolved = self.resolve_all(REQUIRED_EXPORTS)?;
        for name in OPTIONAL_EXPORTS {
            match self.resolve(name) {
                Some(r) => resolved.push(r),
                None => log::warn!("optional export {} not found", name),
            }
        }
        Ok(resolved)
    }

    /// One line per resolution, in `requested -> resolved @ rva [method]` form.
    pub fn resolution_log(resolutions: &[ExportResolution]) -> String {
        let mut out = String::new();
        out.push_str("// IL2CPP Export Resolution Log\n");
        out.push_str("// Format: original_name -> resolved_name @ address [resolution_method]\n\n");
        for r in resolutions {
            out.push_str(&r.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table() -> Vec<(String, u64)> {
        REQUIRED_EXPORTS
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), 0x1000 + i as u64 * 0x10))
            .collect()
    }

    #[test]
    fn test_exact_resolution() {
        let table = ExportTable::from_names(full_table());
        let r = table.resolve("il2cpp_domain_get").unwrap();
        assert_eq!(r.method, ResolutionMethod::Exact);
        assert_eq!(r.rva, 0x1000);
    }

    #[test]
    fn test_renamed_export_fallback() {
        let mut names = full_table();
        names.retain(|(n, _)| n != "il2cpp_domain_get_assemblies");
        names.push(("xq9_wasting_your_life".to_string(), 0x9000));
        let table = ExportTable::from_names(names);

        let r = table.resolve("il2cpp_domain_get_assemblies").unwrap();
        assert_eq!(r.resolved, "xq9_wasting_your_life");
        assert_eq!(r.method, ResolutionMethod::SuffixMatch);
        assert_eq!(r.rva, 0x9000);
        assert!(table.resolve_all(REQUIRED_EXPORTS).is_ok());
    }

    #[test]
    fn test_suffix_alone_does_not_match() {
        let table = ExportTable::from_names(vec![("_wasting_your_life".to_string(), 1u64)]);
        assert!(table.resolve("il2cpp_domain_get_assemblies").is_none());
    }

    #[test]
    fn test_missing_required_exports_are_listed() {
        let table = ExportTable::from_names(vec![("il2cpp_domain_get".to_string(), 1u64)]);
        match table.verify() {
            Err(BindingError::MissingExports(missing)) => {
                assert!(missing.contains(&"il2cpp_thread_attach".to_string()));
                assert!(!missing.contains(&"il2cpp_domain_get".to_string()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_resolution_log_format() {
        let table = ExportTable::from_names(full_table());
        let r = table.resolve("il2cpp_domain_get").unwrap();
        let log = ExportTable::resolution_log(&[r]);
        assert!(log.contains("il2cpp_domain_get -> il2cpp_domain_get @ 0x1000 [Exact]"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ExportTable::parse(&[0u8; 16]).is_err());
    }
}
