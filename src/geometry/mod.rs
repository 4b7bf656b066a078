//! Geometry module for track and via copper
//!
//! # Submodules
//! - `types` - Integer points and rectangles
//! - `distance` - Point/segment distance with the degenerate-segment floor
//! - `shapes` - `Capsule` and `Disc` behind the `ShapeQuery` trait
//! - `polygon` - Clearance polygon generation for zone filling

mod types;
mod distance;
mod shapes;
mod polygon;

pub use types::{Point, Rect, segments_intersect};

pub use distance::{GEOMETRY_MIN_SIZE, point_segment_distance, segment_hit};

pub use shapes::{Capsule, Disc, ShapeQuery};

pub use polygon::{
    MIN_CIRCLE_SEGMENTS,
    PolygonSet,
    circle_to_polygon,
    correction_factor,
    rounded_segment_to_polygon,
};
