//! Core geometry types: integer points and axis-aligned rectangles
//!
//! Coordinates are internal units (nanometres). Exact coordinate equality is
//! meaningful here; the connectivity search relies on it.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 2D point in internal units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_f64(self) -> [f64; 2] {
        [f64::from(self.x), f64::from(self.y)]
    }

    pub fn from_f64(p: [f64; 2]) -> Self {
        Self {
            x: p[0].round() as i32,
            y: p[1].round() as i32,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Rotate counter-clockwise about `center` by `degrees`
    ///
    /// Quarter turns are computed exactly; other angles round to the grid.
    pub fn rotate_about(self, center: Point, degrees: f64) -> Point {
        let rel = self - center;
        let quarter = degrees / 90.0;
        if quarter.fract() == 0.0 {
            let rotated = match (quarter as i64).rem_euclid(4) {
                0 => rel,
                1 => Point::new(-rel.y, rel.x),
                2 => Point::new(-rel.x, -rel.y),
                _ => Point::new(rel.y, -rel.x),
            };
            return center + rotated;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let [x, y] = rel.to_f64();
        center + Point::from_f64([x * cos - y * sin, x * sin + y * cos])
    }

    /// Mirror top-to-bottom about the horizontal line through `center`
    pub fn mirror_y(self, center: Point) -> Point {
        Point::new(self.x, center.y - (self.y - center.y))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Build a rectangle from any two opposite corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    /// Grow (or shrink, for a negative amount) on every side
    pub fn inflate(&self, amount: i32) -> Self {
        let mut r = Self {
            min: Point::new(self.min.x - amount, self.min.y - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount),
        };
        // Shrinking past zero collapses onto the centre
        if r.min.x > r.max.x {
            let cx = self.center().x;
            r.min.x = cx;
            r.max.x = cx;
        }
        if r.min.y > r.max.y {
            let cy = self.center().y;
            r.min.y = cy;
            r.max.y = cy;
        }
        r
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// True if the segment `a`-`b` touches the rectangle
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        if self.contains(a) || self.contains(b) {
            return true;
        }
        let corners = [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ];
        (0..4).any(|i| segments_intersect(a, b, corners[i], corners[(i + 1) % 4]))
    }

    /// True if the disc of `radius` around `center` touches the rectangle
    pub fn intersects_circle(&self, center: Point, radius: i32) -> bool {
        let cx = f64::from(center.x.clamp(self.min.x, self.max.x));
        let cy = f64::from(center.y.clamp(self.min.y, self.max.y));
        let dx = f64::from(center.x) - cx;
        let dy = f64::from(center.y) - cy;
        dx * dx + dy * dy <= f64::from(radius) * f64::from(radius)
    }
}

fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let v = (i64::from(b.x) - i64::from(a.x)) * (i64::from(c.y) - i64::from(a.y))
        - (i64::from(b.y) - i64::from(a.y)) * (i64::from(c.x) - i64::from(a.x));
    v.signum() as i8
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Exact segment/segment intersection test (touching counts)
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && on_segment(a1, a2, b1))
        || (o2 == 0 && on_segment(a1, a2, b2))
        || (o3 == 0 && on_segment(b1, b2, a1))
        || (o4 == 0 && on_segment(b1, b2, a2))
}
