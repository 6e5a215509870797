// Mon Feb 16 2026 - Alex

use crate::memory::{Address, MemoryError};

/// Fault-tolerant read of foreign memory. Unreadable ranges yield `None`,
/// never a crash and never an error the caller has to route.
pub trait MemoryProbe {
    fn try_read(&self, addr: Address, len: usize) -> Option<Vec<u8>>;

    fn try_read_u16(&self, addr: Address) -> Option<u16> {
        let bytes = self.try_read(addr, 2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn try_read_u32(&self, addr: Address) -> Option<u32> {
        let bytes = self.try_read(addr, 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn try_read_i32(&self, addr: Address) -> Option<i32> {
        self.try_read_u32(addr).map(|v| v as i32)
    }

    fn try_read_u64(&self, addr: Address) -> Option<u64> {
        let bytes = self.try_read(addr, 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        Some(u64::from_le_bytes(raw))
    }

    fn try_read_ptr(&self, addr: Address) -> Option<Address> {
        self.try_read_u64(addr).map(Address::new)
    }
}

/// A captured byte image mapped at `base`. Reads outside it fail.
#[derive(Debug, Clone)]
pub struct BufferProbe {
    base: Address,
    data: Vec<u8>,
}

impl BufferProbe {
    pub fn new(base: Address, data: Vec<u8>) -> Self {
        Self { base, data }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write(&mut self, addr: Address, bytes: &[u8]) -> bool {
        if addr < self.base {
            return false;
        }
        let start = (addr.as_u64() - self.base.as_u64()) as usize;
        let Some(end) = start.checked_add(bytes.len()) else {
            return false;
        };
        if end > self.data.len() {
            return false;
        }
        self.data[start..end].copy_from_slice(bytes);
        true
    }
}

impl MemoryProbe for BufferProbe {
    fn try_read(&self, addr: Address, len: usize) -> Option<Vec<u8>> {
        if addr < self.base {
            return None;
        }
        let start = usize::try_from(addr.as_u64() - self.base.as_u64()).ok()?;
        let end = start.checked_add(len)?;
        self.data.get(start..end).map(|s| s.to_vec())
    }
}

/// Probe that never reads anything. Used when no probe is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl MemoryProbe for NullProbe {
    fn try_read(&self, _addr: Address, _len: usize) -> Option<Vec<u8>> {
        None
    }
}

/// Reads a process's memory without dereferencing raw pointers, so a bad
/// address surfaces as an error code instead of a fault.
#[derive(Debug, Clone, Copy)]
pub struct ProcessProbe {
    pid: i32,
}

impl ProcessProbe {
    pub fn new(pid: i32) -> Self {
        Self { pid }
    }

    pub fn current() -> Self {
        Self { pid: std::process::id() as i32 }
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    #[cfg(target_os = "linux")]
    pub fn read(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let mut buffer = vec![0u8; len];
        if len == 0 {
            return Ok(buffer);
        }

        let local = libc::iovec {
            iov_base: buffer.as_mut_ptr() as *mut libc::c_void,
            iov_len: len,
        };
        let remote = libc::iovec {
            iov_base: addr.as_u64() as *mut libc::c_void,
            iov_len: len,
        };

        // process_vm_readv reports EFAULT for unmapped ranges; nothing is dereferenced here.
        let read = unsafe { libc::process_vm_readv(self.pid, &local, 1, &remote, 1, 0) };
        if read < 0 {
            return Err(MemoryError::Io(std::io::Error::last_os_error()));
        }
        if read as usize != len {
            return Err(MemoryError::ShortRead {
                address: addr.as_u64(),
                wanted: len,
                got: read as usize,
            });
        }
        Ok(buffer)
    }

    #[cfg(not(target_os = "linux"))]
    pub fn read(&self, _addr: Address, _len: usize) -> Result<Vec<u8>, MemoryError> {
        Err(MemoryError::NotSupported(
            "process reads are only implemented for linux".to_string(),
        ))
    }
}

impl MemoryProbe for ProcessProbe {
    fn try_read(&self, addr: Address, len: usize) -> Option<Vec<u8>> {
        if addr.is_null() {
            return None;
        }
        match self.read(addr, len) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::trace!("probe read at {} failed: {}", addr, e);
                None
            }
        }
    }
}
