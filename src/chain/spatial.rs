//! R-tree snapshot of a chain for point and rectangle locate
//!
//! The index is built from the chain at one moment and is not updated by
//! later mutations. Every locate re-checks candidates against the chain it
//! is given, so stale entries are dropped rather than returned.

use rstar::{RTree, RTreeObject, AABB};
use std::time::Instant;

use super::TrackChain;
use crate::board::LayerSet;
use crate::geometry::{Point, Rect};
use crate::track::SegmentId;

/// Bounding box of one chain entry, tagged with its chain position
#[derive(Clone, Debug)]
pub struct IndexedSegment {
    pub id: SegmentId,
    pub order: usize,
    pub bounds: AABB<[i64; 2]>,
}

impl IndexedSegment {
    fn new(id: SegmentId, order: usize, bbox: &Rect) -> Self {
        let bounds = AABB::from_corners(
            [i64::from(bbox.min.x), i64::from(bbox.min.y)],
            [i64::from(bbox.max.x), i64::from(bbox.max.y)],
        );
        Self { id, order, bounds }
    }
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

pub struct ChainSpatialIndex {
    tree: RTree<IndexedSegment>,
}

impl ChainSpatialIndex {
    /// Bulk-load the bounding boxes of every visible entry
    pub fn build(chain: &TrackChain) -> Self {
        let start_time = Instant::now();
        let objects: Vec<IndexedSegment> = chain
            .iter()
            .enumerate()
            .filter(|(_, seg)| !seg.is_hidden())
            .map(|(order, seg)| IndexedSegment::new(seg.id(), order, &seg.bounding_box()))
            .collect();
        let count = objects.len();
        let tree = RTree::bulk_load(objects);
        tracing::info!(
            count,
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "built chain spatial index"
        );
        Self { tree }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    fn candidates(&self, envelope: &AABB<[i64; 2]>) -> Vec<&IndexedSegment> {
        let mut found: Vec<&IndexedSegment> =
            self.tree.locate_in_envelope_intersecting(envelope).collect();
        found.sort_by_key(|obj| obj.order);
        found
    }

    /// Entries whose shape covers `point` on a layer in `mask`, in chain order
    pub fn locate_point(&self, chain: &TrackChain, point: Point, mask: LayerSet) -> Vec<SegmentId> {
        let envelope = AABB::from_point([i64::from(point.x), i64::from(point.y)]);
        self.candidates(&envelope)
            .into_iter()
            .filter_map(|obj| chain.get(obj.id))
            .filter(|seg| !seg.is_hidden() && mask.intersects(seg.layer_set()) && seg.hit_test(point))
            .map(|seg| seg.id())
            .collect()
    }

    /// Entries selected by a rectangle, in chain order
    ///
    /// With `contained` an entry must lie entirely inside the rectangle
    /// inflated by `accuracy`; otherwise touching it is enough.
    pub fn locate_rect(
        &self,
        chain: &TrackChain,
        rect: &Rect,
        contained: bool,
        accuracy: i32,
    ) -> Vec<SegmentId> {
        let search = rect.inflate(accuracy);
        let envelope = AABB::from_corners(
            [i64::from(search.min.x), i64::from(search.min.y)],
            [i64::from(search.max.x), i64::from(search.max.y)],
        );
        self.candidates(&envelope)
            .into_iter()
            .filter_map(|obj| chain.get(obj.id))
            .filter(|seg| !seg.is_hidden() && seg.hit_test_rect(rect, contained, accuracy))
            .map(|seg| seg.id())
            .collect()
    }

    /// Other entries whose bounding boxes come within `margin` of `id`'s box
    pub fn neighbors(&self, chain: &TrackChain, id: SegmentId, margin: i32) -> Vec<SegmentId> {
        let Some(seg) = chain.get(id) else {
            return Vec::new();
        };
        let bbox = seg.bounding_box().inflate(margin);
        let envelope = AABB::from_corners(
            [i64::from(bbox.min.x), i64::from(bbox.min.y)],
            [i64::from(bbox.max.x), i64::from(bbox.max.y)],
        );
        self.candidates(&envelope)
            .into_iter()
            .filter(|obj| obj.id != id && chain.contains(obj.id))
            .map(|obj| obj.id)
            .collect()
    }
}
