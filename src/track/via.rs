//! Via payload: layer pair, via kind and drill
//!
//! The top layer is the one closer to the front face. Setters store what
//! they are given; `sanitize_layers` repairs inverted pairs and clamps the
//! span to what the via kind allows.

use serde::{Deserialize, Serialize};

use super::types::ViaType;
use crate::board::{DesignSettings, Layer, LayerSet};

/// Stored drill value meaning "use the board default"
pub const UNDEFINED_DRILL_DIAMETER: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Via {
    via_type: ViaType,
    top: Layer,
    bottom: Layer,
    drill: i32,
}

impl Default for Via {
    fn default() -> Self {
        Self {
            via_type: ViaType::Through,
            top: Layer::F_CU,
            bottom: Layer::B_CU,
            drill: UNDEFINED_DRILL_DIAMETER,
        }
    }
}

impl Via {
    pub fn new(via_type: ViaType, top: Layer, bottom: Layer) -> Self {
        Self {
            via_type,
            top,
            bottom,
            drill: UNDEFINED_DRILL_DIAMETER,
        }
    }

    pub fn via_type(&self) -> ViaType {
        self.via_type
    }

    pub fn set_via_type(&mut self, via_type: ViaType) {
        self.via_type = via_type;
    }

    pub fn top_layer(&self) -> Layer {
        self.top
    }

    pub fn bottom_layer(&self) -> Layer {
        self.bottom
    }

    pub fn set_top_layer(&mut self, layer: Layer) {
        self.top = layer;
    }

    pub fn set_bottom_layer(&mut self, layer: Layer) {
        self.bottom = layer;
    }

    /// The two layers the via connects (it also touches every layer between them)
    pub fn layer_pair(&self) -> (Layer, Layer) {
        (self.top, self.bottom)
    }

    pub fn set_layer_pair(&mut self, top: Layer, bottom: Layer) {
        self.top = top;
        self.bottom = bottom;
    }

    /// Layers the via occupies. Through vias cover every copper layer.
    pub fn layer_set(&self) -> LayerSet {
        match self.via_type {
            ViaType::Through => LayerSet::span(Layer::F_CU, Layer::B_CU),
            _ => LayerSet::span(self.top, self.bottom),
        }
    }

    pub fn is_on_layer(&self, layer: Layer) -> bool {
        let (lo, hi) = if self.top <= self.bottom {
            (self.top, self.bottom)
        } else {
            (self.bottom, self.top)
        };
        layer >= lo && layer <= hi
    }

    /// Repair the layer pair for this via kind on a board of `copper_count` layers
    ///
    /// Returns true if anything changed.
    pub fn sanitize_layers(&mut self, copper_count: u8) -> bool {
        let before = (self.top, self.bottom);

        if self.via_type == ViaType::Through {
            self.top = Layer::F_CU;
            self.bottom = Layer::B_CU;
        }

        if self.bottom < self.top {
            std::mem::swap(&mut self.top, &mut self.bottom);
        }

        if self.via_type == ViaType::Microvia {
            if self.top.is_front() {
                self.bottom = self.top.below(copper_count);
            } else if self.bottom.is_back() {
                self.top = self.bottom.above(copper_count);
            } else {
                self.bottom = self.top.below(copper_count);
            }
        }

        let changed = before != (self.top, self.bottom);
        if changed {
            tracing::warn!(
                ?before,
                top = self.top.0,
                bottom = self.bottom.0,
                via_type = ?self.via_type,
                "via layers repaired"
            );
        }
        changed
    }

    /// Mirror the layer pair front-to-back; through vias are unaffected
    pub fn flip_layers(&mut self, copper_count: u8) {
        if self.via_type == ViaType::Through {
            return;
        }
        let top = self.bottom.flip(copper_count);
        let bottom = self.top.flip(copper_count);
        self.set_layer_pair(top, bottom);
    }

    /// Local drill setting; see `drill_value` for the resolved diameter
    pub fn drill(&self) -> i32 {
        self.drill
    }

    pub fn set_drill(&mut self, drill: i32) {
        self.drill = drill;
    }

    pub fn set_drill_default(&mut self) {
        self.drill = UNDEFINED_DRILL_DIAMETER;
    }

    /// True for any non-positive stored drill, not only the sentinel
    pub fn is_drill_default(&self) -> bool {
        self.drill <= 0
    }

    /// The local drill if positive, else the board default for this via kind
    pub fn drill_value(&self, settings: &DesignSettings) -> i32 {
        if self.drill > 0 {
            return self.drill;
        }
        match self.via_type {
            ViaType::Microvia => settings.default_microvia_drill,
            _ => settings.default_via_drill,
        }
    }
}
