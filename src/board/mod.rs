//! Board-level context: layers, design settings and the board container
//!
//! # Submodules
//! - `layers` - Copper layer ids, stack navigation and layer masks
//! - `settings` - Design settings loaded from JSON
//! - `model` - `Board`, owner of the settings and the track chain

mod layers;
mod settings;
mod model;

pub use layers::{Layer, LayerSet, MAX_COPPER_LAYERS};

pub use settings::{mm_to_iu, DesignSettings, IU_PER_MM};

pub use model::Board;
