//! The board: design settings plus the track chain it owns

use std::path::Path;

use super::layers::Layer;
use super::settings::DesignSettings;
use crate::chain::TrackChain;
use crate::error::ChainError;
use crate::geometry::{Point, PolygonSet};
use crate::track::{Segment, SegmentId};

#[derive(Debug, Clone, Default)]
pub struct Board {
    settings: DesignSettings,
    tracks: TrackChain,
}

impl Board {
    pub fn new(settings: DesignSettings) -> Self {
        Self {
            settings: settings.normalized(),
            tracks: TrackChain::new(),
        }
    }

    /// Empty board with settings read from a JSON file
    pub fn from_settings_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::new(DesignSettings::load(path)?))
    }

    pub fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    pub fn copper_layer_count(&self) -> u8 {
        self.settings.copper_layer_count
    }

    pub fn tracks(&self) -> &TrackChain {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut TrackChain {
        &mut self.tracks
    }

    /// Add a segment to the chain; via layers are repaired for this board first
    pub fn add(&mut self, mut segment: Segment) -> Result<SegmentId, ChainError> {
        let copper_count = self.settings.copper_layer_count;
        if let Some(via) = segment.as_via_mut() {
            via.sanitize_layers(copper_count);
        }
        self.tracks.insert(segment)
    }

    pub fn remove(&mut self, id: SegmentId) -> Option<Segment> {
        self.tracks.remove(id)
    }

    /// Resolved drill of a via; `None` if `id` is unknown or not a via
    pub fn drill_value(&self, id: SegmentId) -> Option<i32> {
        let via = self.tracks.get(id)?.as_via()?;
        Some(via.drill_value(&self.settings))
    }

    /// Clearance required between two entries
    pub fn clearance_between(&self, a: SegmentId, b: SegmentId) -> Option<i32> {
        let first = self.tracks.get(a)?;
        let second = self.tracks.get(b)?;
        Some(first.clearance(&self.settings, Some(second)))
    }

    pub fn move_segment(&mut self, id: SegmentId, offset: Point) -> Result<(), ChainError> {
        self.tracks
            .get_mut(id)
            .ok_or(ChainError::UnknownSegment(id))?
            .move_by(offset);
        Ok(())
    }

    pub fn rotate_segment(&mut self, id: SegmentId, center: Point, degrees: f64) -> Result<(), ChainError> {
        self.tracks
            .get_mut(id)
            .ok_or(ChainError::UnknownSegment(id))?
            .rotate(center, degrees);
        Ok(())
    }

    /// Mirror a segment about the horizontal line through `center` and move it
    /// to the opposite side of the stack
    pub fn flip_segment(&mut self, id: SegmentId, center: Point) -> Result<(), ChainError> {
        let copper_count = self.settings.copper_layer_count;
        self.tracks
            .get_mut(id)
            .ok_or(ChainError::UnknownSegment(id))?
            .flip(center, copper_count);
        Ok(())
    }

    /// Clearance outlines a zone of `zone_net` on `layer` must avoid
    pub fn zone_clearance(&self, layer: Layer, zone_net: Option<i32>, circle_segments: u32) -> PolygonSet {
        self.tracks
            .clearance_polygons(&self.settings, layer, zone_net, circle_segments)
    }
}
