// Mon Feb 16 2026 - Alex

use std::fmt;

/// Prologue byte pattern, anchored at the first byte of a method body.
/// `None` positions are wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<Option<u8>>,
    name: Option<String>,
}

impl Pattern {
    /// Parses `"48 83 EC ?? C3"`. Tokens that are neither hex nor `?`/`??` are dropped.
    pub fn from_hex(hex: &str) -> Self {
        let bytes = hex
            .split_whitespace()
            .filter_map(|token| match token {
                "?" | "??" => Some(None),
                _ => u8::from_str_radix(token, 16).ok().map(Some),
            })
            .collect();
        Self { bytes, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A body shorter than the pattern never matches.
    pub fn matches(&self, body: &[u8]) -> bool {
        body.len() >= self.bytes.len()
            && self
                .bytes
                .iter()
                .zip(body)
                .all(|(expected, actual)| expected.map_or(true, |b| b == *actual))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}: ", name)?;
        }
        let tokens: Vec<String> = self
            .bytes
            .iter()
            .map(|b| match b {
                Some(b) => format!("{:02X}", b),
                None => "??".to_string(),
            })
            .collect();
        write!(f, "{}", tokens.join(" "))
    }
}
