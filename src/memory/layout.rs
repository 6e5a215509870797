// Mon Feb 16 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryProbe};
use serde::{Deserialize, Serialize};
use std::fmt;

const POINTER_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutVersion {
    /// 2019/2020 runtimes.
    V24,
    /// 2021+ runtimes, with the extra virtual-call pointer after the code pointer.
    #[default]
    V29,
}

impl fmt::Display for LayoutVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutVersion::V24 => write!(f, "v24"),
            LayoutVersion::V29 => write!(f, "v29"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
    pub pointer: bool,
}

impl FieldSpec {
    const fn ptr(name: &'static str, offset: usize) -> Self {
        Self { name, offset, size: POINTER_SIZE, pointer: true }
    }

    const fn scalar(name: &'static str, offset: usize, size: usize) -> Self {
        Self { name, offset, size, pointer: false }
    }

    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructSpec {
    pub name: &'static str,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfoLayout {
    pub code_pointer: FieldSpec,
    pub name: FieldSpec,
    pub klass: FieldSpec,
    pub return_type: FieldSpec,
    pub parameters: FieldSpec,
    pub generic_container: FieldSpec,
    pub token: FieldSpec,
    pub flags: FieldSpec,
    pub slot: FieldSpec,
    pub parameter_count: FieldSpec,
    pub bitfield: FieldSpec,
}

impl MethodInfoLayout {
    fn fields(&self) -> [FieldSpec; 11] {
        [
            self.code_pointer,
            self.name,
            self.klass,
            self.return_type,
            self.parameters,
            self.generic_container,
            self.token,
            self.flags,
            self.slot,
            self.parameter_count,
            self.bitfield,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericContainerLayout {
    pub owner_index: FieldSpec,
    pub type_argc: FieldSpec,
    pub is_method: FieldSpec,
    pub generic_parameter_start: FieldSpec,
}

impl GenericContainerLayout {
    fn fields(&self) -> [FieldSpec; 4] {
        [self.owner_index, self.type_argc, self.is_method, self.generic_parameter_start]
    }
}

/// Offsets of the runtime structures read directly from memory, declared
/// once per runtime version and checked with [`RuntimeLayout::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeLayout {
    pub version: LayoutVersion,
    pub method_info: StructSpec,
    pub method: MethodInfoLayout,
    pub generic_container: StructSpec,
    pub container: GenericContainerLayout,
}

const CONTAINER_LAYOUT: GenericContainerLayout = GenericContainerLayout {
    owner_index: FieldSpec::scalar("owner_index", 0x0, 4),
    type_argc: FieldSpec::scalar("type_argc", 0x4, 4),
    is_method: FieldSpec::scalar("is_method", 0x8, 4),
    generic_parameter_start: FieldSpec::scalar("generic_parameter_start", 0xC, 4),
};

const CONTAINER_STRUCT: StructSpec = StructSpec { name: "Il2CppGenericContainer", size: 0x10 };

impl RuntimeLayout {
    pub const IS_GENERIC_BIT: u8 = 0x1;
    pub const IS_INFLATED_BIT: u8 = 0x2;

    pub fn for_version(version: LayoutVersion) -> Self {
        match version {
            LayoutVersion::V24 => Self::v24(),
            LayoutVersion::V29 => Self::v29(),
        }
    }

    fn v24() -> Self {
        Self {
            version: LayoutVersion::V24,
            method_info: StructSpec { name: "MethodInfo", size: 0x50 },
            method: MethodInfoLayout {
                code_pointer: FieldSpec::ptr("method_pointer", 0x0),
                name: FieldSpec::ptr("name", 0x10),
                klass: FieldSpec::ptr("klass", 0x18),
                return_type: FieldSpec::ptr("return_type", 0x20),
                parameters: FieldSpec::ptr("parameters", 0x28),
                generic_container: FieldSpec::ptr("generic_container", 0x38),
                token: FieldSpec::scalar("token", 0x40, 4),
                flags: FieldSpec::scalar("flags", 0x44, 2),
                slot: FieldSpec::scalar("slot", 0x48, 2),
                parameter_count: FieldSpec::scalar("parameters_count", 0x4A, 1),
                bitfield: FieldSpec::scalar("bitfield", 0x4B, 1),
            },
            generic_container: CONTAINER_STRUCT,
            container: CONTAINER_LAYOUT,
        }
    }

    fn v29() -> Self {
        Self {
            version: LayoutVersion::V29,
            method_info: StructSpec { name: "MethodInfo", size: 0x58 },
            method: MethodInfoLayout {
                code_pointer: FieldSpec::ptr("method_pointer", 0x0),
                name: FieldSpec::ptr("name", 0x18),
                klass: FieldSpec::ptr("klass", 0x20),
                return_type: FieldSpec::ptr("return_type", 0x28),
                parameters: FieldSpec::ptr("parameters", 0x30),
                generic_container: FieldSpec::ptr("generic_container", 0x40),
                token: FieldSpec::scalar("token", 0x48, 4),
                flags: FieldSpec::scalar("flags", 0x4C, 2),
                slot: FieldSpec::scalar("slot", 0x50, 2),
                parameter_count: FieldSpec::scalar("parameters_count", 0x52, 1),
                bitfield: FieldSpec::scalar("bitfield", 0x53, 1),
            },
            generic_container: CONTAINER_STRUCT,
            container: CONTAINER_LAYOUT,
        }
    }

    pub fn validate(&self) -> Result<(), MemoryError> {
        let label = format!("{}/{}", self.method_info.name, self.version);
        check_struct(&label, self.method_info.size, &self.method.fields())?;

        let label = format!("{}/{}", self.generic_container.name, self.version);
        check_struct(&label, self.generic_container.size, &self.container.fields())?;
        Ok(())
    }
}

fn check_struct(label: &str, size: usize, fields: &[FieldSpec]) -> Result<(), MemoryError> {
    for field in fields {
        if field.end() > size {
            return Err(MemoryError::FieldOutOfBounds {
                layout: label.to_string(),
                field: field.name,
                offset: field.offset,
                size: field.size,
                limit: size,
            });
        }
        if field.pointer && field.offset % POINTER_SIZE != 0 {
            return Err(MemoryError::FieldMisaligned {
                layout: label.to_string(),
                field: field.name,
                offset: field.offset,
                alignment: POINTER_SIZE,
            });
        }
    }

    let mut sorted: Vec<&FieldSpec> = fields.iter().collect();
    sorted.sort_by_key(|f| f.offset);
    for pair in sorted.windows(2) {
        if pair[0].end() > pair[1].offset {
            return Err(MemoryError::FieldOverlap {
                layout: label.to_string(),
                first: pair[0].name,
                second: pair[1].name,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub owner_index: i32,
    pub type_argc: i32,
    pub is_method: bool,
    pub generic_parameter_start: i32,
}

/// Reads method-info fields of a live runtime through a probe.
pub struct LayoutReader<'a, P: MemoryProbe + ?Sized> {
    layout: &'a RuntimeLayout,
    probe: &'a P,
}

impl<'a, P: MemoryProbe + ?Sized> LayoutReader<'a, P> {
    pub fn new(layout: &'a RuntimeLayout, probe: &'a P) -> Self {
        Self { layout, probe }
    }

    pub fn layout(&self) -> &RuntimeLayout {
        self.layout
    }

    fn field_addr(base: Address, field: &FieldSpec) -> Option<Address> {
        base.non_null()?.checked_add(field.offset as u64)
    }

    /// Native code pointer of a method. A null pointer reads as `Some(0)`.
    pub fn code_pointer(&self, method: Address) -> Option<Address> {
        let addr = Self::field_addr(method, &self.layout.method.code_pointer)?;
        self.probe.try_read_ptr(addr)
    }

    pub fn flags(&self, method: Address) -> Option<u16> {
        let addr = Self::field_addr(method, &self.layout.method.flags)?;
        self.probe.try_read_u16(addr)
    }

    pub fn slot(&self, method: Address) -> Option<u16> {
        let addr = Self::field_addr(method, &self.layout.method.slot)?;
        self.probe.try_read_u16(addr)
    }

    pub fn parameter_count(&self, method: Address) -> Option<u8> {
        let addr = Self::field_addr(method, &self.layout.method.parameter_count)?;
        self.probe.try_read(addr, 1).map(|b| b[0])
    }

    pub fn is_generic_definition(&self, method: Address) -> Option<bool> {
        let addr = Self::field_addr(method, &self.layout.method.bitfield)?;
        let bits = self.probe.try_read(addr, 1)?[0];
        Some(bits & RuntimeLayout::IS_GENERIC_BIT != 0 && bits & RuntimeLayout::IS_INFLATED_BIT == 0)
    }

    /// Generic container of an uninflated generic method definition.
    pub fn generic_container(&self, method: Address) -> Option<ContainerInfo> {
        if !self.is_generic_definition(method)? {
            return None;
        }
        let slot = Self::field_addr(method, &self.layout.method.generic_container)?;
        let container = self.probe.try_read_ptr(slot)?.non_null()?;
        let c = &self.layout.container;

        let owner_index = self.probe.try_read_i32(Self::field_addr(container, &c.owner_index)?)?;
        let type_argc = self.probe.try_read_i32(Self::field_addr(container, &c.type_argc)?)?;
        let is_method = self.probe.try_read_i32(Self::field_addr(container, &c.is_method)?)?;
        let start = self
            .probe
            .try_read_i32(Self::field_addr(container, &c.generic_parameter_start)?)?;

        Some(ContainerInfo {
            owner_index,
            type_argc,
            is_method: is_method != 0,
            generic_parameter_start: start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::BufferProbe;

    #[test]
    fn test_builtin_layouts_validate() {
        assert!(RuntimeLayout::for_version(LayoutVersion::V24).validate().is_ok());
        assert!(RuntimeLayout::for_version(LayoutVersion::V29).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut layout = RuntimeLayout::for_version(LayoutVersion::V29);
        layout.method.flags.offset = layout.method.token.offset + 2;
        assert!(matches!(layout.validate(), Err(MemoryError::FieldOverlap { .. })));
    }

    #[test]
    fn test_validate_rejects_misaligned_pointer() {
        let mut layout = RuntimeLayout::for_version(LayoutVersion::V24);
        layout.method.name.offset = 0x12;
        assert!(matches!(layout.validate(), Err(MemoryError::FieldMisaligned { field: "name", .. })));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let mut layout = RuntimeLayout::for_version(LayoutVersion::V24);
        layout.method_info.size = 0x48;
        assert!(matches!(layout.validate(), Err(MemoryError::FieldOutOfBounds { .. })));
    }

    #[test]
    fn test_reader_generic_container() {
        let layout = RuntimeLayout::for_version(LayoutVersion::V29);
        let base = Address::new(0x10_000);
        let mut probe = BufferProbe::new(base, vec![0; 0x100]);

        let method = base;
        let container = base + 0x80;
        probe.write(method, &0x4000_1234u64.to_le_bytes());
        probe.write(method + 0x40, &container.as_u64().to_le_bytes());
        probe.write(method + 0x53, &[RuntimeLayout::IS_GENERIC_BIT]);
        probe.write(container + 0x4, &2i32.to_le_bytes());
        probe.write(container + 0x8, &1i32.to_le_bytes());
        probe.write(container + 0xC, &37i32.to_le_bytes());

        let reader = LayoutReader::new(&layout, &probe);
        assert_eq!(reader.code_pointer(method), Some(Address::new(0x4000_1234)));
        let info = reader.generic_container(method).unwrap();
        assert_eq!(info.type_argc, 2);
        assert!(info.is_method);
        assert_eq!(info.generic_parameter_start, 37);

        probe.write(method + 0x53, &[RuntimeLayout::IS_GENERIC_BIT | RuntimeLayout::IS_INFLATED_BIT]);
        let reader = LayoutReader::new(&layout, &probe);
        assert!(reader.generic_container(method).is_none());
        assert!(reader.code_pointer(Address::zero()).is_none());
    }
}
