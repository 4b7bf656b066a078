//! Identity, selector and flag types shared by tracks and vias

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable handle of a track, via or zone-boundary segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(Uuid);

impl SegmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seg({})", &self.0.to_string()[..8])
    }
}

/// Which end of a segment a locate routine works from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    pub fn opposite(self) -> Endpoint {
        match self {
            Endpoint::Start => Endpoint::End,
            Endpoint::End => Endpoint::Start,
        }
    }
}

/// Via kinds, ordered by how many layers they may span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViaType {
    /// Always spans every copper layer
    #[default]
    Through,
    /// May start or stop on inner layers
    BlindBuried,
    /// Connects an outer layer to its neighbouring inner layer
    Microvia,
    NotDefined,
}

/// Soft state bits on a chain entry
///
/// `deleted` and `busy` hide an entry from searches and spatial queries
/// while it stays in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateFlags {
    pub locked: bool,
    pub deleted: bool,
    pub busy: bool,
}

impl StateFlags {
    /// True if searches should skip the entry
    pub fn is_hidden(&self) -> bool {
        self.deleted || self.busy
    }
}

/// Result of an endpoint proximity test: start, end, both or neither
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndHits(u8);

impl EndHits {
    pub const NONE: EndHits = EndHits(0);
    pub const START: EndHits = EndHits(0b01);
    pub const END: EndHits = EndHits(0b10);
    pub const BOTH: EndHits = EndHits(0b11);

    pub fn contains(self, other: EndHits) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for EndHits {
    type Output = EndHits;
    fn bitor(self, rhs: EndHits) -> EndHits {
        EndHits(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EndHits {
    fn bitor_assign(&mut self, rhs: EndHits) {
        self.0 |= rhs.0;
    }
}
