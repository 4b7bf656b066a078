//! Copper layer identifiers and layer masks
//!
//! Layers are numbered from the front face: `F_CU` is 0, inner layers follow
//! in stack order and `B_CU` is always 31 regardless of how many copper
//! layers the board actually uses.

use serde::{Deserialize, Serialize};

/// Maximum number of copper layers a board can carry
pub const MAX_COPPER_LAYERS: u8 = 32;

/// A single board layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Layer {
    /// Front copper
    pub const F_CU: Layer = Layer(0);
    /// Back copper
    pub const B_CU: Layer = Layer(31);

    /// Inner copper layer `In<n>` (1-based)
    pub fn inner(n: u8) -> Layer {
        Layer(n.clamp(1, MAX_COPPER_LAYERS - 2))
    }

    pub fn is_front(self) -> bool {
        self == Layer::F_CU
    }

    pub fn is_back(self) -> bool {
        self == Layer::B_CU
    }

    pub fn is_inner(self) -> bool {
        self.0 > Layer::F_CU.0 && self.0 < Layer::B_CU.0
    }

    /// Mirror the layer front-to-back for a board with `copper_count` layers
    ///
    /// `F_CU` and `B_CU` swap; inner layer `In k` becomes `In (copper_count - 1 - k)`.
    pub fn flip(self, copper_count: u8) -> Layer {
        if self.is_front() {
            return Layer::B_CU;
        }
        if self.is_back() {
            return Layer::F_CU;
        }
        if copper_count <= 2 {
            return self;
        }
        let mirrored = i16::from(copper_count) - 1 - i16::from(self.0);
        if mirrored < 1 {
            self
        } else {
            Layer::inner(mirrored as u8)
        }
    }

    /// The copper layer directly below this one on a board with `copper_count` layers
    pub fn below(self, copper_count: u8) -> Layer {
        if self.is_back() {
            Layer::B_CU
        } else if self.is_front() {
            if copper_count <= 2 { Layer::B_CU } else { Layer::inner(1) }
        } else if self.0 >= copper_count.saturating_sub(2) {
            Layer::B_CU
        } else {
            Layer(self.0 + 1)
        }
    }

    /// The copper layer directly above this one on a board with `copper_count` layers
    pub fn above(self, copper_count: u8) -> Layer {
        if self.is_front() || self.0 == 1 {
            Layer::F_CU
        } else if self.is_back() {
            if copper_count <= 2 { Layer::F_CU } else { Layer::inner(copper_count - 2) }
        } else {
            Layer(self.0 - 1)
        }
    }
}

/// Bit mask over the 64 possible board layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerSet(pub u64);

impl LayerSet {
    /// Every bit set: matches any layer ("-1" mask)
    pub const ALL: LayerSet = LayerSet(u64::MAX);
    pub const EMPTY: LayerSet = LayerSet(0);

    pub fn single(layer: Layer) -> Self {
        LayerSet(bit(layer.0))
    }

    /// All layers from `top` to `bottom` inclusive (order-insensitive)
    pub fn span(top: Layer, bottom: Layer) -> Self {
        let (lo, hi) = if top <= bottom { (top.0, bottom.0) } else { (bottom.0, top.0) };
        let mut bits = 0u64;
        for id in lo..=hi {
            bits |= bit(id);
        }
        LayerSet(bits)
    }

    /// Every copper layer present on a board with `copper_count` layers
    pub fn all_copper(copper_count: u8) -> Self {
        let mut set = LayerSet::single(Layer::F_CU).with(Layer::B_CU);
        for n in 1..copper_count.saturating_sub(1) {
            set = set.with(Layer::inner(n));
        }
        set
    }

    pub fn with(self, layer: Layer) -> Self {
        LayerSet(self.0 | bit(layer.0))
    }

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & bit(layer.0) != 0
    }

    pub fn intersects(self, other: LayerSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerSet) -> Self {
        LayerSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Mask bit for a layer id; ids past the mask width have none
fn bit(id: u8) -> u64 {
    1u64.checked_shl(u32::from(id)).unwrap_or(0)
}

impl From<Layer> for LayerSet {
    fn from(layer: Layer) -> Self {
        LayerSet::single(layer)
    }
}
