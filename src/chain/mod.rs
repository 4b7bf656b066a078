//! Net-ordered chain of tracks, vias and zone-boundary segments
//!
//! The chain is the only owner and the only mutator of its segments. Entries
//! are kept sorted by ascending net code at all times: every insertion picks
//! a position that preserves the order, and a net-code change re-seats the
//! entry. Within one net, entries keep their insertion order.
//!
//! # Submodules
//! - `search` - Endpoint, via, net-range and connectivity searches
//! - `ends` - Free-end detection for a run of connected segments
//! - `spatial` - R-tree snapshot for point and rectangle locate
//! - `zone_fill` - Parallel clearance polygon batch for zone filling

mod search;
mod ends;
mod spatial;
mod zone_fill;

pub use ends::PathEnds;
pub use spatial::{ChainSpatialIndex, IndexedSegment};

use indexmap::IndexMap;

use crate::error::ChainError;
use crate::track::{Segment, SegmentClass, SegmentId};

#[derive(Debug, Clone, Default)]
pub struct TrackChain {
    items: IndexMap<SegmentId, Segment>,
}

impl TrackChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.items.get(&id)
    }

    /// Mutable access for geometry, layer and state edits
    ///
    /// The net code is not editable here; use `set_net_code`.
    pub fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.items.get_mut(&id)
    }

    /// Position of `id` in chain order
    pub fn index_of(&self, id: SegmentId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    pub fn at(&self, index: usize) -> Option<&Segment> {
        self.items.get_index(index).map(|(_, seg)| seg)
    }

    pub fn first(&self) -> Option<SegmentId> {
        self.items.first().map(|(id, _)| *id)
    }

    pub fn last(&self) -> Option<SegmentId> {
        self.items.last().map(|(id, _)| *id)
    }

    /// The entry after `id`
    pub fn next(&self, id: SegmentId) -> Option<SegmentId> {
        let index = self.index_of(id)?;
        self.items.get_index(index + 1).map(|(id, _)| *id)
    }

    /// The entry before `id`
    pub fn back(&self, id: SegmentId) -> Option<SegmentId> {
        let index = self.index_of(id)?;
        let prev = index.checked_sub(1)?;
        self.items.get_index(prev).map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.items.keys().copied()
    }

    /// Entries from `start` (inclusive) to the end of the chain;
    /// from the head when `start` is `None`, nothing when it is unknown
    pub fn iter_from(&self, start: Option<SegmentId>) -> impl Iterator<Item = &Segment> {
        let from = match start {
            Some(id) => self.index_of(id).unwrap_or(self.items.len()),
            None => 0,
        };
        self.items.values().skip(from)
    }

    /// Entries of one class, in chain order
    pub fn iter_class(&self, class: SegmentClass) -> impl Iterator<Item = &Segment> {
        self.items.values().filter(move |seg| seg.class() == class)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Segment> {
        self.iter_class(SegmentClass::Track)
    }

    pub fn vias(&self) -> impl Iterator<Item = &Segment> {
        self.iter_class(SegmentClass::Via)
    }

    pub fn zone_boundaries(&self) -> impl Iterator<Item = &Segment> {
        self.iter_class(SegmentClass::ZoneBoundary)
    }

    /// First via at or after `from`, not looking past `stop`
    pub fn first_via(&self, from: Option<SegmentId>, stop: Option<SegmentId>) -> Option<SegmentId> {
        self.first_of_class(SegmentClass::Via, from, stop)
    }

    /// First trace at or after `from`, not looking past `stop`
    pub fn first_track(&self, from: Option<SegmentId>, stop: Option<SegmentId>) -> Option<SegmentId> {
        self.first_of_class(SegmentClass::Track, from, stop)
    }

    fn first_of_class(
        &self,
        class: SegmentClass,
        from: Option<SegmentId>,
        stop: Option<SegmentId>,
    ) -> Option<SegmentId> {
        for seg in self.iter_from(from) {
            if Some(seg.id()) == stop {
                return None;
            }
            if seg.class() == class {
                return Some(seg.id());
            }
        }
        None
    }

    /// Where a segment of `net_code` belongs: the first entry with a
    /// strictly greater net code, or `None` for the end of the chain
    pub fn best_insert_point(&self, net_code: i32) -> Option<SegmentId> {
        self.items
            .values()
            .find(|seg| seg.net_code() > net_code)
            .map(Segment::id)
    }

    fn insert_index(&self, net_code: i32) -> usize {
        self.best_insert_point(net_code)
            .and_then(|id| self.index_of(id))
            .unwrap_or(self.items.len())
    }

    /// Insert at the end of the segment's net-code run
    pub fn insert(&mut self, segment: Segment) -> Result<SegmentId, ChainError> {
        let id = segment.id();
        if self.items.contains_key(&id) {
            return Err(ChainError::DuplicateSegment(id));
        }
        let index = self.insert_index(segment.net_code());
        tracing::debug!(%id, net = segment.net_code(), index, "insert segment");
        self.items.shift_insert(index, id, segment);
        Ok(id)
    }

    /// Insert directly before `before` (at the end for `None`)
    ///
    /// Fails if the position would break the net-code order.
    pub fn insert_before(
        &mut self,
        before: Option<SegmentId>,
        segment: Segment,
    ) -> Result<SegmentId, ChainError> {
        let id = segment.id();
        if self.items.contains_key(&id) {
            return Err(ChainError::DuplicateSegment(id));
        }
        let index = match before {
            Some(b) => self.index_of(b).ok_or(ChainError::UnknownSegment(b))?,
            None => self.items.len(),
        };

        let net_code = segment.net_code();
        let prev_ok = index == 0 || self.at(index - 1).map_or(true, |p| p.net_code() <= net_code);
        let next_ok = self.at(index).map_or(true, |n| n.net_code() >= net_code);
        if !(prev_ok && next_ok) {
            return Err(ChainError::OutOfOrder { net_code, position: index });
        }

        tracing::debug!(%id, net = net_code, index, "insert segment at explicit position");
        self.items.shift_insert(index, id, segment);
        Ok(id)
    }

    /// Detach a segment from the chain and hand it back
    pub fn remove(&mut self, id: SegmentId) -> Option<Segment> {
        let removed = self.items.shift_remove(&id);
        if removed.is_some() {
            tracing::debug!(%id, "remove segment");
        }
        removed
    }

    /// Drop every segment flagged as deleted; returns how many were removed
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|_, seg| !seg.is_deleted());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Change a segment's net code, moving it to the end of its new net's run
    pub fn set_net_code(&mut self, id: SegmentId, net_code: i32) -> Result<(), ChainError> {
        let current = self.get(id).ok_or(ChainError::UnknownSegment(id))?.net_code();
        if current == net_code {
            return Ok(());
        }
        let mut segment = self.items.shift_remove(&id).ok_or(ChainError::UnknownSegment(id))?;
        segment.set_net_code(net_code);
        let index = self.insert_index(net_code);
        self.items.shift_insert(index, id, segment);
        Ok(())
    }

    /// Copy a segment under a fresh handle and insert the copy
    pub fn duplicate(&mut self, id: SegmentId) -> Result<SegmentId, ChainError> {
        let copy = self.get(id).ok_or(ChainError::UnknownSegment(id))?.duplicate();
        self.insert(copy)
    }

    /// Exchange the payload of a chain entry with an out-of-chain image
    ///
    /// The handle stays with the chain slot. If the net code changed the
    /// entry is re-seated to keep the chain sorted.
    pub fn swap_data(&mut self, id: SegmentId, image: &mut Segment) -> Result<(), ChainError> {
        let segment = self.items.get_mut(&id).ok_or(ChainError::UnknownSegment(id))?;
        let old_net = segment.net_code();
        segment.swap_data(image);
        let new_net = segment.net_code();

        if old_net != new_net {
            if let Some(moved) = self.items.shift_remove(&id) {
                let index = self.insert_index(new_net);
                self.items.shift_insert(index, id, moved);
            }
        }
        Ok(())
    }

    /// True if net codes are non-decreasing along the chain
    pub fn is_sorted(&self) -> bool {
        self.items
            .values()
            .zip(self.items.values().skip(1))
            .all(|(a, b)| a.net_code() <= b.net_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layer;
    use crate::geometry::Point;
    use crate::track::Via;

    fn trace(net: i32) -> Segment {
        Segment::track(Point::new(0, 0), Point::new(10, 0), 2, Layer::F_CU, net)
    }

    fn nets(chain: &TrackChain) -> Vec<i32> {
        chain.iter().map(Segment::net_code).collect()
    }

    #[test]
    fn test_insert_keeps_net_order() {
        let mut chain = TrackChain::new();
        for net in [3, 1, 2, 3, 0, 2, 1] {
            chain.insert(trace(net)).unwrap();
        }
        assert_eq!(nets(&chain), vec![0, 1, 1, 2, 2, 3, 3]);
        assert!(chain.is_sorted());
    }

    #[test]
    fn test_insert_appends_within_net() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(1)).unwrap();
        let b = chain.insert(trace(1)).unwrap();
        assert_eq!(chain.index_of(a), Some(0));
        assert_eq!(chain.index_of(b), Some(1));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut chain = TrackChain::new();
        let seg = trace(1);
        let copy = seg.clone();
        chain.insert(seg).unwrap();
        assert!(matches!(chain.insert(copy), Err(ChainError::DuplicateSegment(_))));
    }

    #[test]
    fn test_insert_before_checks_order() {
        let mut chain = TrackChain::new();
        let one = chain.insert(trace(1)).unwrap();
        chain.insert(trace(5)).unwrap();
        assert!(chain.insert_before(Some(one), trace(0)).is_ok());
        let err = chain.insert_before(Some(one), trace(7)).unwrap_err();
        assert!(matches!(err, ChainError::OutOfOrder { net_code: 7, .. }));
        assert!(chain.insert_before(None, trace(9)).is_ok());
        assert!(chain.is_sorted());
    }

    #[test]
    fn test_next_and_back() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(1)).unwrap();
        let b = chain.insert(trace(2)).unwrap();
        assert_eq!(chain.next(a), Some(b));
        assert_eq!(chain.back(b), Some(a));
        assert_eq!(chain.back(a), None);
        assert_eq!(chain.next(b), None);
    }

    #[test]
    fn test_set_net_code_reseats() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(1)).unwrap();
        chain.insert(trace(2)).unwrap();
        chain.insert(trace(3)).unwrap();
        chain.set_net_code(a, 4).unwrap();
        assert_eq!(chain.index_of(a), Some(2));
        assert!(chain.is_sorted());
    }

    #[test]
    fn test_swap_data_reseats_on_net_change() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(1)).unwrap();
        chain.insert(trace(2)).unwrap();
        let mut image = Segment::via(Point::new(5, 5), 600, Via::default(), 9);
        chain.swap_data(a, &mut image).unwrap();

        let swapped = chain.get(a).unwrap();
        assert!(swapped.is_via());
        assert_eq!(swapped.net_code(), 9);
        assert_eq!(chain.index_of(a), Some(1));
        assert!(image.is_track());
        assert_eq!(image.net_code(), 1);
        assert!(chain.is_sorted());
    }

    #[test]
    fn test_typed_filters() {
        let mut chain = TrackChain::new();
        let t = chain.insert(trace(1)).unwrap();
        let v = chain
            .insert(Segment::via(Point::new(0, 0), 600, Via::default(), 1))
            .unwrap();
        assert_eq!(chain.first_via(None, None), Some(v));
        assert_eq!(chain.first_track(None, None), Some(t));
        assert_eq!(chain.first_via(None, Some(v)), None);
        assert_eq!(chain.vias().count(), 1);
        assert_eq!(chain.tracks().count(), 1);
    }

    #[test]
    fn test_purge_deleted() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(1)).unwrap();
        chain.insert(trace(2)).unwrap();
        chain.get_mut(a).unwrap().set_deleted(true);
        assert_eq!(chain.purge_deleted(), 1);
        assert_eq!(chain.len(), 1);
    }
}
