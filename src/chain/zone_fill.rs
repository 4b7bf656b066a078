//! Clearance polygon batch for zone filling
//!
//! A copper zone must keep its clearance from every track and via of other
//! nets on its layer. This collects the grown outlines of all such entries
//! in parallel; the caller subtracts them from the zone outline.

use rayon::prelude::*;
use std::time::Instant;

use super::TrackChain;
use crate::board::{DesignSettings, Layer};
use crate::geometry::{correction_factor, PolygonSet, MIN_CIRCLE_SEGMENTS};
use crate::track::Segment;

impl TrackChain {
    /// Clearance outlines of every visible track and via on `layer`
    ///
    /// Entries of `zone_net` are skipped since they connect to the zone.
    /// Zone-boundary segments are part of existing fills and never
    /// contribute. Outlines are returned in chain order.
    pub fn clearance_polygons(
        &self,
        settings: &DesignSettings,
        layer: Layer,
        zone_net: Option<i32>,
        circle_segments: u32,
    ) -> PolygonSet {
        let start_time = Instant::now();
        let segments = circle_segments.max(MIN_CIRCLE_SEGMENTS);
        let correction = correction_factor(segments);

        let candidates: Vec<&Segment> = self
            .iter()
            .filter(|seg| !seg.is_hidden() && !seg.is_zone_boundary())
            .filter(|seg| seg.is_on_layer(layer))
            .filter(|seg| zone_net.map_or(true, |net| seg.net_code() != net))
            .collect();

        let outlines: Vec<PolygonSet> = candidates
            .par_iter()
            .map(|seg| {
                let mut buffer = PolygonSet::new();
                let clearance = seg.clearance(settings, None);
                seg.transform_shape_with_clearance_to_polygon(
                    &mut buffer,
                    clearance,
                    segments,
                    correction,
                    false,
                );
                buffer
            })
            .collect();

        let mut result = PolygonSet::new();
        for outline in outlines {
            result.extend(outline);
        }

        tracing::info!(
            layer = layer.0,
            entries = candidates.len(),
            outlines = result.outline_count(),
            vertices = result.total_vertices(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "clearance polygons built"
        );
        result
    }
}
