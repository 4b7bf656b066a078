//! Board-wide design settings
//!
//! These are the values a track or via falls back to when it carries no
//! local value of its own: default clearance, default via drills, and the
//! copper layer count used by layer flipping and via sanitizing.

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::layers::MAX_COPPER_LAYERS;

/// Internal units per millimetre (1 IU = 1 nm)
pub const IU_PER_MM: f64 = 1_000_000.0;

/// Convert millimetres to internal units
pub fn mm_to_iu(mm: f64) -> i32 {
    (mm * IU_PER_MM).round() as i32
}

/// Design settings supplied by the board to every query that needs a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    pub copper_layer_count: u8,
    pub default_clearance: i32,
    pub default_via_drill: i32,
    pub default_microvia_drill: i32,
    /// Per-net clearance overrides keyed by net code
    pub net_clearances: IndexMap<i32, i32>,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            copper_layer_count: 2,
            default_clearance: mm_to_iu(0.2),
            default_via_drill: mm_to_iu(0.4),
            default_microvia_drill: mm_to_iu(0.1),
            net_clearances: IndexMap::new(),
        }
    }
}

impl DesignSettings {
    /// Parse settings from a JSON document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let settings: DesignSettings =
            serde_json::from_str(json).context("invalid design settings JSON")?;
        Ok(settings.normalized())
    }

    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read design settings from {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("failed to load design settings from {}", path.display()))
    }

    /// Clamp the copper layer count to an even value in `2..=32`
    pub fn normalized(mut self) -> Self {
        let requested = self.copper_layer_count;
        let mut count = requested.clamp(2, MAX_COPPER_LAYERS);
        if count % 2 == 1 {
            count += 1;
        }
        if count != requested {
            tracing::warn!(requested, used = count, "copper layer count out of range, adjusted");
        }
        self.copper_layer_count = count;
        self
    }

    /// Clearance for a net: its override if one is set, else the board default
    pub fn clearance_for_net(&self, net_code: i32) -> i32 {
        self.net_clearances
            .get(&net_code)
            .copied()
            .unwrap_or(self.default_clearance)
    }
}
