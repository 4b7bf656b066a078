//! Shape-specific spatial queries
//!
//! A trace or zone-boundary segment is a `Capsule` (a stroke with round
//! ends), a via is a `Disc`. Both answer the same small set of questions
//! through `ShapeQuery`.

use super::distance::segment_hit;
use super::polygon::{circle_to_polygon, rounded_segment_to_polygon, PolygonSet};
use super::types::{Point, Rect};

/// Spatial capability shared by every copper shape
pub trait ShapeQuery {
    /// Axis-aligned box covering the full stroke
    fn bounding_box(&self) -> Rect;

    /// True if `p` lies on the copper
    fn hit_test(&self, p: Point) -> bool;

    /// Rectangle hit test; `rect` is first inflated by `accuracy`.
    /// With `contained` the shape must lie inside, otherwise touching is enough.
    fn hit_test_rect(&self, rect: &Rect, contained: bool, accuracy: i32) -> bool;

    /// Append the shape grown by `clearance` to `buffer` as a closed polygon
    fn transform_with_clearance(
        &self,
        buffer: &mut PolygonSet,
        clearance: i32,
        circle_segments: u32,
        correction: f64,
        ignore_width: bool,
    );
}

/// A straight stroke of `width` between two points, with round ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub start: Point,
    pub end: Point,
    pub width: i32,
}

/// A filled circle of `diameter`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Point,
    pub diameter: i32,
}

fn half_extent(width: i32) -> i32 {
    (width.max(0) + 1) / 2
}

impl ShapeQuery for Capsule {
    fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.start, self.end).inflate(half_extent(self.width))
    }

    fn hit_test(&self, p: Point) -> bool {
        segment_hit(p, self.start, self.end, self.width / 2)
    }

    fn hit_test_rect(&self, rect: &Rect, contained: bool, accuracy: i32) -> bool {
        let area = rect.inflate(accuracy);
        if contained {
            area.contains_rect(&self.bounding_box())
        } else {
            area.intersects_segment(self.start, self.end)
        }
    }

    fn transform_with_clearance(
        &self,
        buffer: &mut PolygonSet,
        clearance: i32,
        circle_segments: u32,
        correction: f64,
        ignore_width: bool,
    ) {
        let stroke = if ignore_width { 0.0 } else { f64::from(self.width) / 2.0 };
        let half_width = stroke + f64::from(clearance);
        buffer.append_outline(rounded_segment_to_polygon(
            self.start,
            self.end,
            half_width,
            circle_segments,
            correction,
        ));
    }
}

impl ShapeQuery for Disc {
    fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.center, self.center).inflate(half_extent(self.diameter))
    }

    fn hit_test(&self, p: Point) -> bool {
        let radius = f64::from(self.diameter / 2);
        let [dx, dy] = (p - self.center).to_f64();
        dx * dx + dy * dy <= radius * radius
    }

    fn hit_test_rect(&self, rect: &Rect, contained: bool, accuracy: i32) -> bool {
        let area = rect.inflate(accuracy);
        if contained {
            let extent = Rect::from_corners(self.center, self.center).inflate(self.diameter / 2);
            area.contains_rect(&extent)
        } else {
            area.intersects_circle(self.center, self.diameter / 2)
        }
    }

    fn transform_with_clearance(
        &self,
        buffer: &mut PolygonSet,
        clearance: i32,
        circle_segments: u32,
        correction: f64,
        ignore_width: bool,
    ) {
        let body = if ignore_width { 0.0 } else { f64::from(self.diameter) / 2.0 };
        let radius = body + f64::from(clearance);
        buffer.append_outline(circle_to_polygon(self.center, radius, circle_segments, correction));
    }
}
