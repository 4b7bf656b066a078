//! Point and segment distance calculations

use super::types::Point;

/// Smallest meaningful feature size (0.001 mm). Shapes below it are treated
/// as degenerate when polygonizing.
pub const GEOMETRY_MIN_SIZE: i32 = 1000;

/// Point-to-segment minimum distance, with the closest point on the segment
///
/// A zero-length segment is measured against its nearer endpoint.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> (f64, [f64; 2]) {
    let [px, py] = p.to_f64();
    let [ax, ay] = a.to_f64();
    let [bx, by] = b.to_f64();
    let ab = [bx - ax, by - ay];
    let ab_len2 = ab[0] * ab[0] + ab[1] * ab[1];

    if ab_len2 < 1.0 {
        let da = (px - ax).hypot(py - ay);
        let db = (px - bx).hypot(py - by);
        return if da <= db { (da, [ax, ay]) } else { (db, [bx, by]) };
    }

    let t = (((px - ax) * ab[0] + (py - ay) * ab[1]) / ab_len2).clamp(0.0, 1.0);
    let closest = [ax + t * ab[0], ay + t * ab[1]];
    ((px - closest[0]).hypot(py - closest[1]), closest)
}

/// True if `p` lies within `radius` of the segment `a`-`b`
pub fn segment_hit(p: Point, a: Point, b: Point, radius: i32) -> bool {
    let (d, _) = point_segment_distance(p, a, b);
    d <= f64::from(radius)
}
