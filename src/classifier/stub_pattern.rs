// Mon Feb 16 2026 - Alex

use crate::memory::{Address, MemoryProbe};
use crate::pattern::Pattern;
use std::fmt;

/// Trivial x86-64 bodies the obfuscator compiles its noise to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubIdiom {
    Return,
    TrapReturn,
    ReturnZero,
    PaddedReturnZero,
    MoveZeroReturn,
    MoveOneReturn,
    EmptyFrame,
    BalancedStack,
}

impl StubIdiom {
    pub fn name(&self) -> &'static str {
        match self {
            StubIdiom::Return => "ret",
            StubIdiom::TrapReturn => "int3; ret",
            StubIdiom::ReturnZero => "xor eax, eax; ret",
            StubIdiom::PaddedReturnZero => "nop; xor eax, eax; ret",
            StubIdiom::MoveZeroReturn => "mov eax, 0; ret",
            StubIdiom::MoveOneReturn => "mov eax, 1; ret",
            StubIdiom::EmptyFrame => "push rbp; mov rbp, rsp; pop rbp; ret",
            StubIdiom::BalancedStack => "sub rsp, n; add rsp, n; ret",
        }
    }
}

impl fmt::Display for StubIdiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of probing one code address. Unreadable memory is no signal at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubInspection {
    Unreadable,
    NoMatch(Vec<u8>),
    Match(StubIdiom, Vec<u8>),
}

impl StubInspection {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            StubInspection::Unreadable => None,
            StubInspection::NoMatch(bytes) | StubInspection::Match(_, bytes) => Some(bytes),
        }
    }

    pub fn idiom(&self) -> Option<StubIdiom> {
        match self {
            StubInspection::Match(idiom, _) => Some(*idiom),
            _ => None,
        }
    }
}

/// Prologue matcher feeding the report only. It never decides a verdict.
pub struct StubMatcher {
    patterns: Vec<(StubIdiom, Pattern)>,
    body_size: usize,
}

impl StubMatcher {
    pub fn new(body_size: usize) -> Self {
        let patterns = vec![
            (StubIdiom::Return, Pattern::from_hex("C3")),
            (StubIdiom::TrapReturn, Pattern::from_hex("CC C3")),
            (StubIdiom::ReturnZero, Pattern::from_hex("33 C0 C3")),
            (StubIdiom::PaddedReturnZero, Pattern::from_hex("90 33 C0 C3")),
            (StubIdiom::MoveZeroReturn, Pattern::from_hex("B8 00 00 00 00 C3")),
            (StubIdiom::MoveOneReturn, Pattern::from_hex("B8 01 00 00 00 C3")),
            (StubIdiom::EmptyFrame, Pattern::from_hex("55 48 89 E5 5D C3")),
            (StubIdiom::BalancedStack, Pattern::from_hex("48 83 EC ?? 48 83 C4 ?? C3")),
        ]
        .into_iter()
        .map(|(idiom, pattern)| {
            let pattern = pattern.with_name(idiom.name());
            (idiom, pattern)
        })
        .collect();

        Self {
            patterns,
            body_size: body_size.max(8),
        }
    }

    /// Anchored match at the start of `body`.
    pub fn match_bytes(&self, body: &[u8]) -> Option<StubIdiom> {
        self.patterns
            .iter()
            .find(|(idiom, pattern)| {
                pattern.matches(body)
                    && (*idiom != StubIdiom::BalancedStack || body.get(3) == body.get(7))
            })
            .map(|(idiom, _)| *idiom)
    }

    /// Reads the body at `address`, retrying with eight bytes when the full
    /// read fails near the end of a mapping.
    pub fn inspect(&self, probe: &dyn MemoryProbe, address: Address) -> StubInspection {
        if address.is_null() {
            return StubInspection::Unreadable;
        }
        let body = probe
            .try_read(address, self.body_size)
            .or_else(|| probe.try_read(address, 8));

        match body {
            None => {
                log::warn!("Stub address {} is unreadable", address);
                StubInspection::Unreadable
            }
            Some(bytes) => match self.match_bytes(&bytes) {
                Some(idiom) => StubInspection::Match(idiom, bytes),
                None => StubInspection::NoMatch(bytes),
            },
        }
    }
}

impl Default for StubMatcher {
    fn default() -> Self {
        Self::new(16)
    }
}
