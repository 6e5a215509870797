// Mon Feb 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    value: u64,
}

impl Address {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    pub const fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    pub fn is_aligned(&self, alignment: usize) -> bool {
        alignment == 0 || self.value % alignment as u64 == 0
    }

    pub fn checked_add(&self, offset: u64) -> Option<Self> {
        self.value.checked_add(offset).map(Self::new)
    }

    /// Offset of `self` relative to `base`, or the raw value when it lies below it.
    pub fn rva(&self, base: Address) -> u64 {
        if base.is_null() || self.value < base.value {
            self.value
        } else {
            self.value - base.value
        }
    }

    /// Null addresses become `None`.
    pub fn non_null(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

impl Add<u64> for Address {
    type Output = Self;
    fn add(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_add(rhs) }
    }
}

impl Sub<Address> for Address {
    type Output = i64;
    fn sub(self, rhs: Address) -> Self::Output {
        self.value as i64 - rhs.value as i64
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}
