//! The chain entity: a trace, a via or a zone-boundary segment
//!
//! All three share one record: two endpoints, a width and a net code. A via
//! keeps `start == end` and uses `width` as its diameter; a zone-boundary
//! segment is geometrically a trace and differs only by its class.

use serde::{Deserialize, Serialize};

use super::types::{EndHits, Endpoint, SegmentId, StateFlags};
use super::via::Via;
use crate::board::{DesignSettings, Layer, LayerSet};
use crate::geometry::{Capsule, Disc, Point, PolygonSet, Rect, ShapeQuery};

/// Width given to a freshly constructed trace (0.2 mm)
pub const DEFAULT_TRACK_WIDTH: i32 = 200_000;

/// Diameter given to a freshly constructed via (0.8 mm)
pub const DEFAULT_VIA_DIAMETER: i32 = 800_000;

/// Class discriminator used by typed enumeration filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentClass {
    Track,
    Via,
    ZoneBoundary,
}

impl SegmentClass {
    pub fn name(self) -> &'static str {
        match self {
            SegmentClass::Track => "TRACK",
            SegmentClass::Via => "VIA",
            SegmentClass::ZoneBoundary => "ZONE",
        }
    }
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Track { layer: Layer },
    ZoneBoundary { layer: Layer },
    Via(Via),
}

/// Geometric shape of a segment, for the `ShapeQuery` capability
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentShape {
    Capsule(Capsule),
    Disc(Disc),
}

impl ShapeQuery for SegmentShape {
    fn bounding_box(&self) -> Rect {
        match self {
            SegmentShape::Capsule(c) => c.bounding_box(),
            SegmentShape::Disc(d) => d.bounding_box(),
        }
    }

    fn hit_test(&self, p: Point) -> bool {
        match self {
            SegmentShape::Capsule(c) => c.hit_test(p),
            SegmentShape::Disc(d) => d.hit_test(p),
        }
    }

    fn hit_test_rect(&self, rect: &Rect, contained: bool, accuracy: i32) -> bool {
        match self {
            SegmentShape::Capsule(c) => c.hit_test_rect(rect, contained, accuracy),
            SegmentShape::Disc(d) => d.hit_test_rect(rect, contained, accuracy),
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
        match self {
            SegmentShape::Capsule(c) => {
                c.transform_with_clearance(buffer, clearance, circle_segments, correction, ignore_width)
            }
            SegmentShape::Disc(d) => {
                d.transform_with_clearance(buffer, clearance, circle_segments, correction, ignore_width)
            }
        }
    }
}

/// A track, via or zone-boundary segment
///
/// The net code can only change through the owning chain, which keeps the
/// chain sorted; everything else is freely editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    id: SegmentId,
    kind: SegmentKind,
    net_code: i32,
    start: Point,
    end: Point,
    width: i32,
    state: StateFlags,
}

impl Segment {
    /// A segment of the given kind with default geometry on net 0
    pub fn new(kind: SegmentKind) -> Self {
        let width = match kind {
            SegmentKind::Via(_) => DEFAULT_VIA_DIAMETER,
            _ => DEFAULT_TRACK_WIDTH,
        };
        Self {
            id: SegmentId::new(),
            kind,
            net_code: 0,
            start: Point::default(),
            end: Point::default(),
            width,
            state: StateFlags::default(),
        }
    }

    pub fn track(start: Point, end: Point, width: i32, layer: Layer, net_code: i32) -> Self {
        Self {
            start,
            end,
            width,
            net_code,
            ..Self::new(SegmentKind::Track { layer })
        }
    }

    pub fn zone_boundary(start: Point, end: Point, width: i32, layer: Layer, net_code: i32) -> Self {
        Self {
            start,
            end,
            width,
            net_code,
            ..Self::new(SegmentKind::ZoneBoundary { layer })
        }
    }

    pub fn via(position: Point, diameter: i32, via: Via, net_code: i32) -> Self {
        Self {
            start: position,
            end: position,
            width: diameter,
            net_code,
            ..Self::new(SegmentKind::Via(via))
        }
    }

    /// Same entity data under a fresh handle
    pub fn duplicate(&self) -> Self {
        Self {
            id: SegmentId::new(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    pub fn class(&self) -> SegmentClass {
        match self.kind {
            SegmentKind::Track { .. } => SegmentClass::Track,
            SegmentKind::ZoneBoundary { .. } => SegmentClass::ZoneBoundary,
            SegmentKind::Via(_) => SegmentClass::Via,
        }
    }

    pub fn is_via(&self) -> bool {
        matches!(self.kind, SegmentKind::Via(_))
    }

    pub fn is_track(&self) -> bool {
        matches!(self.kind, SegmentKind::Track { .. })
    }

    pub fn is_zone_boundary(&self) -> bool {
        matches!(self.kind, SegmentKind::ZoneBoundary { .. })
    }

    pub fn as_via(&self) -> Option<&Via> {
        match &self.kind {
            SegmentKind::Via(via) => Some(via),
            _ => None,
        }
    }

    pub fn as_via_mut(&mut self) -> Option<&mut Via> {
        match &mut self.kind {
            SegmentKind::Via(via) => Some(via),
            _ => None,
        }
    }

    pub fn net_code(&self) -> i32 {
        self.net_code
    }

    pub(crate) fn set_net_code(&mut self, net_code: i32) {
        self.net_code = net_code;
    }

    /// Layer of a trace, or the top layer of a via
    pub fn layer(&self) -> Layer {
        match &self.kind {
            SegmentKind::Track { layer } | SegmentKind::ZoneBoundary { layer } => *layer,
            SegmentKind::Via(via) => via.top_layer(),
        }
    }

    pub fn set_layer(&mut self, new_layer: Layer) {
        match &mut self.kind {
            SegmentKind::Track { layer } | SegmentKind::ZoneBoundary { layer } => *layer = new_layer,
            SegmentKind::Via(via) => via.set_top_layer(new_layer),
        }
    }

    pub fn layer_set(&self) -> LayerSet {
        match &self.kind {
            SegmentKind::Track { layer } | SegmentKind::ZoneBoundary { layer } => LayerSet::single(*layer),
            SegmentKind::Via(via) => via.layer_set(),
        }
    }

    pub fn is_on_layer(&self, layer: Layer) -> bool {
        match &self.kind {
            SegmentKind::Via(via) => via.is_on_layer(layer),
            _ => self.layer() == layer,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Move the start point; a via moves as a whole
    pub fn set_start(&mut self, p: Point) {
        self.start = p;
        if self.is_via() {
            self.end = p;
        }
    }

    /// Move the end point; a via moves as a whole
    pub fn set_end(&mut self, p: Point) {
        self.end = p;
        if self.is_via() {
            self.start = p;
        }
    }

    pub fn endpoint(&self, which: Endpoint) -> Point {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    /// Start point; a via has only this one logical position
    pub fn position(&self) -> Point {
        self.start
    }

    /// Move a trace's start, or both coincident points of a via
    pub fn set_position(&mut self, p: Point) {
        self.start = p;
        if self.is_via() {
            self.end = p;
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// True for a zero-length trace
    pub fn is_null(&self) -> bool {
        self.start == self.end
    }

    /// Reverse the direction of the segment
    pub fn swap_ends(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn state(&self) -> StateFlags {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.state.locked = locked;
    }

    pub fn is_deleted(&self) -> bool {
        self.state.deleted
    }

    pub fn set_deleted(&mut self, deleted: bool) {
        self.state.deleted = deleted;
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.state.busy = busy;
    }

    /// Deleted or busy entries are invisible to searches
    pub fn is_hidden(&self) -> bool {
        self.state.is_hidden()
    }

    pub fn move_by(&mut self, offset: Point) {
        self.start += offset;
        self.end += offset;
    }

    /// Rotate counter-clockwise about `center` by `degrees`
    pub fn rotate(&mut self, center: Point, degrees: f64) {
        self.start = self.start.rotate_about(center, degrees);
        self.end = self.end.rotate_about(center, degrees);
    }

    /// Mirror to the other board side about the horizontal line through `center`
    pub fn flip(&mut self, center: Point, copper_count: u8) {
        self.start = self.start.mirror_y(center);
        self.end = self.end.mirror_y(center);
        match &mut self.kind {
            SegmentKind::Track { layer } | SegmentKind::ZoneBoundary { layer } => {
                *layer = layer.flip(copper_count);
            }
            SegmentKind::Via(via) => via.flip_layers(copper_count),
        }
    }

    pub fn shape(&self) -> SegmentShape {
        match self.kind {
            SegmentKind::Via(_) => SegmentShape::Disc(Disc {
                center: self.start,
                diameter: self.width,
            }),
            _ => SegmentShape::Capsule(Capsule {
                start: self.start,
                end: self.end,
                width: self.width,
            }),
        }
    }

    pub fn bounding_box(&self) -> Rect {
        self.shape().bounding_box()
    }

    pub fn hit_test(&self, p: Point) -> bool {
        self.shape().hit_test(p)
    }

    pub fn hit_test_rect(&self, rect: &Rect, contained: bool, accuracy: i32) -> bool {
        self.shape().hit_test_rect(rect, contained, accuracy)
    }

    /// Append the copper grown by `clearance` to `buffer`
    ///
    /// `correction` scales the arc radius so the segment approximation never
    /// falls inside the true outline; `ignore_width` treats the stroke as a
    /// zero-width line.
    pub fn transform_shape_with_clearance_to_polygon(
        &self,
        buffer: &mut PolygonSet,
        clearance: i32,
        circle_segments: u32,
        correction: f64,
        ignore_width: bool,
    ) {
        self.shape()
            .transform_with_clearance(buffer, clearance, circle_segments, correction, ignore_width);
    }

    /// Which ends lie within `min_dist` of `point`
    ///
    /// A negative `min_dist` means half the width; zero means exact equality.
    pub fn is_point_on_ends(&self, point: Point, min_dist: i32) -> EndHits {
        let min_dist = if min_dist < 0 { self.width / 2 } else { min_dist };
        let mut hits = EndHits::NONE;

        if min_dist == 0 {
            if self.start == point {
                hits |= EndHits::START;
            }
            if self.end == point {
                hits |= EndHits::END;
            }
            return hits;
        }

        let limit = f64::from(min_dist);
        if self.start.distance(point).round() <= limit {
            hits |= EndHits::START;
        }
        if self.end.distance(point).round() <= limit {
            hits |= EndHits::END;
        }
        hits
    }

    /// This entity's clearance, or the larger of it and `other`'s
    pub fn clearance(&self, settings: &DesignSettings, other: Option<&Segment>) -> i32 {
        let own = settings.clearance_for_net(self.net_code);
        match other {
            Some(other) => own.max(settings.clearance_for_net(other.net_code)),
            None => own,
        }
    }

    /// Exchange everything except the handle with `other`
    pub(crate) fn swap_data(&mut self, other: &mut Segment) {
        std::mem::swap(&mut self.kind, &mut other.kind);
        std::mem::swap(&mut self.net_code, &mut other.net_code);
        std::mem::swap(&mut self.start, &mut other.start);
        std::mem::swap(&mut self.end, &mut other.end);
        std::mem::swap(&mut self.width, &mut other.width);
        std::mem::swap(&mut self.state, &mut other.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::ViaType;

    fn trace(x0: i32, y0: i32, x1: i32, y1: i32, width: i32) -> Segment {
        Segment::track(Point::new(x0, y0), Point::new(x1, y1), width, Layer::F_CU, 1)
    }

    #[test]
    fn test_length_and_null() {
        let t = trace(0, 0, 3, 4, 1);
        assert!((t.length() - 5.0).abs() < 1e-12);
        assert!(!t.is_null());
        assert!(trace(7, 7, 7, 7, 1).is_null());
    }

    #[test]
    fn test_via_length_is_zero() {
        let v = Segment::via(Point::new(5, 5), 600, Via::default(), 1);
        assert_eq!(v.length(), 0.0);
        assert_eq!(v.class(), SegmentClass::Via);
    }

    #[test]
    fn test_via_endpoint_setters_keep_single_position() {
        let mut via = Segment::via(Point::new(0, 0), 600_000, Via::default(), 1);
        via.set_end(Point::new(1_000_000, 0));
        assert_eq!(via.start(), Point::new(1_000_000, 0));
        assert_eq!(via.length(), 0.0);
        via.set_start(Point::new(-5, 7));
        assert_eq!(via.end(), Point::new(-5, 7));
        assert_eq!(via.length(), 0.0);

        let mut trace = Segment::track(Point::new(0, 0), Point::new(10, 0), 2, Layer::F_CU, 1);
        trace.set_end(Point::new(0, 30));
        assert_eq!(trace.start(), Point::new(0, 0));
        assert_eq!(trace.length(), 30.0);
    }

    #[test]
    fn test_endpoint_selector() {
        let t = trace(1, 2, 3, 4, 1);
        assert_eq!(t.endpoint(Endpoint::Start), Point::new(1, 2));
        assert_eq!(t.endpoint(Endpoint::End), Point::new(3, 4));
        assert_eq!(Endpoint::Start.opposite(), Endpoint::End);
    }

    #[test]
    fn test_set_position() {
        let mut t = trace(0, 0, 10, 0, 1);
        t.set_position(Point::new(5, 5));
        assert_eq!(t.position(), Point::new(5, 5));
        assert_eq!(t.end(), Point::new(10, 0));

        let mut v = Segment::via(Point::new(0, 0), 600, Via::default(), 1);
        v.set_position(Point::new(9, 9));
        assert_eq!(v.start(), Point::new(9, 9));
        assert_eq!(v.end(), Point::new(9, 9));
    }

    #[test]
    fn test_move_rotate_flip() {
        let mut t = trace(0, 0, 10, 0, 1);
        t.move_by(Point::new(5, 5));
        assert_eq!((t.start(), t.end()), (Point::new(5, 5), Point::new(15, 5)));

        t.rotate(Point::new(5, 5), 90.0);
        assert_eq!(t.end(), Point::new(5, 15));

        t.flip(Point::new(0, 0), 2);
        assert_eq!(t.start(), Point::new(5, -5));
        assert_eq!(t.layer(), Layer::B_CU);
    }

    #[test]
    fn test_flip_via_swaps_blind_pair() {
        let via = Via::new(ViaType::BlindBuried, Layer::F_CU, Layer::inner(1));
        let mut v = Segment::via(Point::new(0, 10), 600, via, 1);
        v.flip(Point::new(0, 0), 4);
        assert_eq!(v.position(), Point::new(0, -10));
        assert_eq!(v.as_via().unwrap().layer_pair(), (Layer::inner(2), Layer::B_CU));
    }

    #[test]
    fn test_point_on_ends_uses_half_width() {
        let wide = trace(0, 0, 100, 0, 10);
        assert_eq!(wide.is_point_on_ends(Point::new(3, 0), -1), EndHits::START);
        let thin = trace(0, 0, 100, 0, 2);
        assert!(thin.is_point_on_ends(Point::new(3, 0), -1).is_empty());
    }

    #[test]
    fn test_point_on_ends_exact_and_both() {
        let t = trace(0, 0, 4, 0, 2);
        assert_eq!(t.is_point_on_ends(Point::new(0, 0), 0), EndHits::START);
        assert!(t.is_point_on_ends(Point::new(1, 0), 0).is_empty());
        assert_eq!(t.is_point_on_ends(Point::new(2, 0), 2), EndHits::BOTH);
    }

    #[test]
    fn test_clearance_takes_maximum() {
        let mut settings = DesignSettings::default();
        settings.net_clearances.insert(2, 500_000);
        let a = trace(0, 0, 1, 0, 1);
        let b = Segment::track(Point::new(0, 0), Point::new(1, 0), 1, Layer::F_CU, 2);
        assert_eq!(a.clearance(&settings, None), 200_000);
        assert_eq!(a.clearance(&settings, Some(&b)), 500_000);
        assert_eq!(b.clearance(&settings, Some(&a)), 500_000);
    }

    #[test]
    fn test_zone_boundary_is_trace_shaped() {
        let z = Segment::zone_boundary(Point::new(0, 0), Point::new(100, 0), 10, Layer::F_CU, 1);
        assert_eq!(z.class().name(), "ZONE");
        assert!(z.hit_test(Point::new(50, 5)));
        assert!(matches!(z.shape(), SegmentShape::Capsule(_)));
    }

    #[test]
    fn test_swap_data_keeps_ids() {
        let mut a = trace(0, 0, 1, 0, 1);
        let mut b = Segment::via(Point::new(9, 9), 600, Via::default(), 4);
        let (ida, idb) = (a.id(), b.id());
        a.swap_data(&mut b);
        assert_eq!(a.id(), ida);
        assert_eq!(b.id(), idb);
        assert!(a.is_via());
        assert_eq!(a.net_code(), 4);
        assert!(b.is_track());
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let a = trace(0, 0, 1, 0, 1);
        let b = a.duplicate();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.start(), b.start());
    }
}
