// Mon Feb 16 2026 - Alex

use crate::memory::Address;
use crate::runtime::MethodHandle;
use ahash::AHashMap;

/// Code address to the methods compiled to it. Built once, read-only after.
#[derive(Debug, Clone, Default)]
pub struct PointerShareIndex {
    sharers: AHashMap<Address, Vec<MethodHandle>>,
}

impl PointerShareIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Null addresses are not indexed.
    pub fn record(&mut self, address: Address, method: MethodHandle) {
        if address.is_null() {
            return;
        }
        self.sharers.entry(address).or_default().push(method);
    }

    pub fn sharers(&self, address: Address) -> &[MethodHandle] {
        self.sharers.get(&address).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn share_count(&self, address: Address) -> usize {
        self.sharers(address).len()
    }

    /// Addresses shared by at least `threshold` methods, most shared first.
    pub fn stub_addresses(&self, threshold: usize) -> Vec<(Address, usize)> {
        let mut stubs: Vec<(Address, usize)> = self
            .sharers
            .iter()
            .filter(|(_, methods)| methods.len() >= threshold)
            .map(|(addr, methods)| (*addr, methods.len()))
            .collect();
        stubs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        stubs
    }

    pub fn len(&self) -> usize {
        self.sharers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sharers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_stubs() {
        let mut index = PointerShareIndex::new();
        for i in 0..3 {
            index.record(Address::new(0x1000), MethodHandle::new(i));
        }
        index.record(Address::new(0x2000), MethodHandle::new(10));
        index.record(Address::zero(), MethodHandle::new(11));

        assert_eq!(index.share_count(Address::new(0x1000)), 3);
        assert_eq!(index.share_count(Address::zero()), 0);
        assert_eq!(index.len(), 2);
        assert_eq!(index.stub_addresses(3), vec![(Address::new(0x1000), 3)]);
        assert_eq!(index.stub_addresses(1).len(), 2);
        assert_eq!(index.stub_addresses(1)[0].0, Address::new(0x1000));
    }
}
