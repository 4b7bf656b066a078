//! Clearance polygon generation for zone filling
//!
//! Arcs are approximated by straight segments. Every generated vertex sits on
//! a radius enlarged by the caller's correction factor so that the polygon
//! edges never cut inside the true offset curve.

use serde::Serialize;
use std::f64::consts::PI;

use super::distance::GEOMETRY_MIN_SIZE;
use super::types::Point;

/// Fewest segments accepted for a full circle
pub const MIN_CIRCLE_SEGMENTS: u32 = 8;

/// A set of closed outlines (no holes), in the order they were appended
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolygonSet {
    pub outlines: Vec<Vec<Point>>,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_outline(&mut self, outline: Vec<Point>) {
        if outline.len() >= 3 {
            self.outlines.push(outline);
        }
    }

    pub fn outline_count(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn total_vertices(&self) -> usize {
        self.outlines.iter().map(Vec::len).sum()
    }

    /// Merge another set's outlines into this one
    pub fn extend(&mut self, other: PolygonSet) {
        self.outlines.extend(other.outlines);
    }
}

/// Radius correction that makes a `segments`-gon circumscribe its circle
///
/// The apothem of a regular n-gon with circumradius `R` is `R * cos(pi / n)`,
/// so scaling `R` by `1 / cos(pi / n)` puts every edge on or outside the circle.
pub fn correction_factor(segments: u32) -> f64 {
    let n = f64::from(segments.max(MIN_CIRCLE_SEGMENTS));
    1.0 / (PI / n).cos()
}

/// Even segment count, at least `MIN_CIRCLE_SEGMENTS`
fn normalized_segments(segments: u32) -> u32 {
    let n = segments.max(MIN_CIRCLE_SEGMENTS);
    n + n % 2
}

/// Vertex radius for an arc of true radius `radius`
///
/// One extra unit absorbs the rounding of vertices onto the integer grid.
fn vertex_radius(radius: f64, correction: f64) -> f64 {
    (radius * correction.max(1.0)).ceil() + 1.0
}

/// Approximate a circle as a closed polygon (counter-clockwise)
pub fn circle_to_polygon(
    center: Point,
    radius: f64,
    segments: u32,
    correction: f64,
) -> Vec<Point> {
    let n = normalized_segments(segments);
    let r = vertex_radius(radius, correction);
    let [cx, cy] = center.to_f64();

    (0..n)
        .map(|i| {
            let angle = f64::from(i) * 2.0 * PI / f64::from(n);
            Point::from_f64([cx + r * angle.cos(), cy + r * angle.sin()])
        })
        .collect()
}

/// Approximate a segment with round ends of the given half width
/// (a capsule) as a closed polygon (counter-clockwise)
pub fn rounded_segment_to_polygon(
    start: Point,
    end: Point,
    half_width: f64,
    segments: u32,
    correction: f64,
) -> Vec<Point> {
    let n = normalized_segments(segments);
    let half = n / 2;
    let r = vertex_radius(half_width, correction);

    let [sx, sy] = start.to_f64();
    let [ex, ey] = end.to_f64();
    let len = (ex - sx).hypot(ey - sy);
    let theta = if len < f64::from(GEOMETRY_MIN_SIZE) {
        0.0
    } else {
        (ey - sy).atan2(ex - sx)
    };

    let step = PI / f64::from(half);
    let mut outline = Vec::with_capacity(2 * (half as usize + 1));

    // End cap sweeps from the right side through the forward direction
    for k in 0..=half {
        let angle = theta - PI / 2.0 + f64::from(k) * step;
        outline.push(Point::from_f64([ex + r * angle.cos(), ey + r * angle.sin()]));
    }
    // Start cap sweeps from the left side through the backward direction
    for k in 0..=half {
        let angle = theta + PI / 2.0 + f64::from(k) * step;
        outline.push(Point::from_f64([sx + r * angle.cos(), sy + r * angle.sin()]));
    }

    outline
}
