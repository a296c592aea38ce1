//! Cell identities

use std::fmt;

use uuid::Uuid;

/// Opaque, stable identity of a real cell
///
/// Displays as 32 lowercase hex digits, the form markup hosts store in a
/// `data-uuid` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellId(Uuid);

impl CellId {
    /// A fresh random identity
    pub fn random() -> Self {
        CellId(Uuid::new_v4())
    }

    pub fn from_u128(value: u128) -> Self {
        CellId(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse the hex form produced by `Display` (hyphenated UUIDs also accepted)
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(CellId)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for CellId {
    fn from(uuid: Uuid) -> Self {
        CellId(uuid)
    }
}

/// Source of fresh identities for newly created cells
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdGenerator {
    /// UUID v4
    #[default]
    Random,
    /// Deterministic counter, for tests and reproducible snapshots
    Sequential { next: u128 },
}

impl IdGenerator {
    pub fn sequential() -> Self {
        IdGenerator::Sequential { next: 1 }
    }

    pub fn next_id(&mut self) -> CellId {
        match self {
            IdGenerator::Random => CellId::random(),
            IdGenerator::Sequential { next } => {
                let id = CellId::from_u128(*next);
                *next += 1;
                id
            }
        }
    }
}
