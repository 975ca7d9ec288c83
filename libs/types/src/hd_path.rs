//! Hierarchical-deterministic derivation paths
//!
//! A path is an ordered list of 32-bit indices. Indices with the top bit set
//! ([`HARDENED`]) are hardened derivations and render with a `'` suffix.
//!
//! On the wire a path is an array of integers. Fixtures may also spell it as
//! text (`"m/44'/1'/0'/0'/0'"`, `"44'/156'/0'/0/0"`), so deserialization
//! accepts either form.

use crate::errors::PathError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hardened-derivation bit
pub const HARDENED: u32 = 0x8000_0000;

/// Mark an index as hardened
pub const fn harden(index: u32) -> u32 {
    index | HARDENED
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HdPath(Vec<u32>);

impl HdPath {
    pub fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// Parse `m/44'/0'/0'/0/1` style paths. The leading `m/` is optional and
    /// `h`/`H` are accepted as hardened markers alongside `'`.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let trimmed = text.trim();
        let body = match trimmed {
            "m" | "M" | "" => return Ok(Self::default()),
            _ => trimmed
                .strip_prefix("m/")
                .or_else(|| trimmed.strip_prefix("M/"))
                .unwrap_or(trimmed),
        };

        let mut indices = Vec::new();
        for (position, component) in body.split('/').enumerate() {
            if component.is_empty() {
                return Err(PathError::EmptyComponent {
                    path: text.to_string(),
                    position,
                });
            }

            let (digits, hardened) = match component.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => (digits, true),
                None => (component, false),
            };

            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PathError::InvalidComponent {
                    path: text.to_string(),
                    component: component.to_string(),
                });
            }

            let index: u64 = digits.parse().map_err(|_| PathError::InvalidComponent {
                path: text.to_string(),
                component: component.to_string(),
            })?;
            if index >= u64::from(HARDENED) {
                return Err(PathError::IndexOutOfRange {
                    path: text.to_string(),
                    index,
                });
            }

            let index = index as u32;
            indices.push(if hardened { harden(index) } else { index });
        }

        Ok(Self(indices))
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// BIP-43 purpose of the path (`44`, `49`, `84`, ...) when its first
    /// index is hardened
    pub fn purpose(&self) -> Option<u32> {
        match self.0.first() {
            Some(&first) if first & HARDENED != 0 => Some(first & !HARDENED),
            _ => None,
        }
    }

    /// Copy of the path with one index replaced. Out-of-range positions leave
    /// the path unchanged.
    pub fn with_index(mut self, position: usize, index: u32) -> Self {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = index;
        }
        self
    }
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &index in &self.0 {
            if index & HARDENED != 0 {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

impl FromStr for HdPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<u32>> for HdPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[u32; N]> for HdPath {
    fn from(indices: [u32; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl Serialize for HdPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Indices(Vec<u32>),
    Text(String),
}

impl<'de> Deserialize<'de> for HdPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PathRepr::deserialize(deserializer)? {
            PathRepr::Indices(indices) => Ok(Self(indices)),
            PathRepr::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}
