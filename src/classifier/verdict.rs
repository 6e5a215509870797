// Mon Feb 16 2026 - Alex

use crate::memory::Address;
use crate::runtime::{MethodHandle, TypeHandle};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FakeReason {
    /// Code address reached by `count` methods, at or above the threshold.
    SharedPointer(usize),
    NullPointer,
}

impl FakeReason {
    /// Tag used in the text report.
    pub fn tag(&self) -> String {
        match self {
            FakeReason::SharedPointer(count) => format!("[SHARED x{}]", count),
            FakeReason::NullPointer => "[NULL PTR]".to_string(),
        }
    }
}

impl fmt::Display for FakeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Verdict {
    #[default]
    Real,
    Fake(FakeReason),
}

impl Verdict {
    pub fn is_fake(&self) -> bool {
        matches!(self, Verdict::Fake(_))
    }
}

/// One method judged to be noise, with the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeMethod {
    pub method: MethodHandle,
    pub owner: TypeHandle,
    /// `Namespace.Class` of the owner.
    pub class_name: String,
    pub method_name: String,
    pub signature: String,
    pub code_address: Option<Address>,
    pub reason: FakeReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAnalysis {
    pub class: TypeHandle,
    pub full_name: String,
    pub total_methods: usize,
    pub fake_methods: usize,
    pub real_methods: usize,
    pub is_entirely_fake: bool,
}

impl ClassAnalysis {
    pub fn new(class: TypeHandle, full_name: String) -> Self {
        Self {
            class,
            full_name,
            total_methods: 0,
            fake_methods: 0,
            real_methods: 0,
            is_entirely_fake: false,
        }
    }

    /// No real method at all, or at least five fakes making up 90% or more.
    pub fn compute_entirely_fake(total: usize, fake: usize, real: usize) -> bool {
        if total > 0 && real == 0 {
            return true;
        }
        fake >= 5 && total > 0 && fake * 100 / total >= 90
    }

    pub fn finish(&mut self) {
        self.is_entirely_fake = Self::compute_entirely_fake(self.total_methods, self.fake_methods, self.real_methods);
    }
}
