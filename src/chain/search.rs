//! Chain searches
//!
//! Range searches take an optional start cursor (the chain head when absent)
//! and an optional inclusive end cursor (the chain end when absent). An end
//! cursor that sits before the start is never reached, so the scan runs to
//! the end of the chain. Entries flagged deleted or busy are skipped.

use super::TrackChain;
use crate::board::LayerSet;
use crate::geometry::Point;
use crate::track::{Endpoint, Segment, SegmentId};

impl TrackChain {
    /// Inclusive index bounds for a cursor pair, `None` if nothing to scan
    fn cursor_bounds(&self, start: Option<SegmentId>, end: Option<SegmentId>) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        let first = match start {
            Some(id) => self.index_of(id)?,
            None => 0,
        };
        let last = end
            .and_then(|id| self.index_of(id))
            .filter(|&idx| idx >= first)
            .unwrap_or(self.len() - 1);
        Some((first, last))
    }

    fn scan<'a>(
        &'a self,
        start: Option<SegmentId>,
        end: Option<SegmentId>,
    ) -> impl Iterator<Item = (usize, &'a Segment)> + 'a {
        let bounds = self.cursor_bounds(start, end);
        let (first, count) = match bounds {
            Some((first, last)) => (first, last - first + 1),
            None => (0, 0),
        };
        self.iter().enumerate().skip(first).take(count)
    }

    /// First visible entry with an endpoint exactly at `point` on a layer in `mask`
    pub fn get_track_at(
        &self,
        start: Option<SegmentId>,
        end: Option<SegmentId>,
        point: Point,
        mask: LayerSet,
    ) -> Option<SegmentId> {
        self.scan(start, end)
            .map(|(_, seg)| seg)
            .filter(|seg| !seg.is_hidden())
            .find(|seg| {
                mask.intersects(seg.layer_set()) && (seg.start() == point || seg.end() == point)
            })
            .map(Segment::id)
    }

    /// First visible via whose disc covers `point` on a layer in `mask`
    pub fn get_via(
        &self,
        start: Option<SegmentId>,
        end: Option<SegmentId>,
        point: Point,
        mask: LayerSet,
    ) -> Option<SegmentId> {
        self.scan(start, end)
            .map(|(_, seg)| seg)
            .filter(|seg| seg.is_via() && !seg.is_hidden())
            .find(|seg| mask.intersects(seg.layer_set()) && seg.hit_test(point))
            .map(Segment::id)
    }

    /// Via at `point` with no restriction other than position and layers
    pub fn via_at(&self, point: Point, mask: LayerSet) -> Option<SegmentId> {
        self.get_via(None, None, point, mask)
    }

    /// First entry of net `net_code`, scanning from `start`
    ///
    /// Stops early once the scan has passed the net.
    pub fn start_net_code(&self, start: Option<SegmentId>, net_code: i32) -> Option<SegmentId> {
        self.iter_from(start)
            .take_while(|seg| seg.net_code() <= net_code)
            .find(|seg| seg.net_code() == net_code)
            .map(Segment::id)
    }

    /// Last entry of net `net_code`, scanning from `start`
    pub fn end_net_code(&self, start: Option<SegmentId>, net_code: i32) -> Option<SegmentId> {
        let first = self.start_net_code(start, net_code)?;
        self.iter_from(Some(first))
            .take_while(|seg| seg.net_code() == net_code)
            .last()
            .map(Segment::id)
    }

    /// Every entry of one net, in chain order
    pub fn iter_net(&self, net_code: i32) -> impl Iterator<Item = &Segment> {
        let first = self.start_net_code(None, net_code);
        let from = first.and_then(|id| self.index_of(id)).unwrap_or(self.len());
        self.iter()
            .skip(from)
            .take_while(move |seg| seg.net_code() == net_code)
    }

    /// The next entry attached to one endpoint of `current`
    ///
    /// Another entry qualifies when either of its endpoints coincides
    /// exactly with the selected endpoint of `current`, it shares a layer
    /// with `current`, and it is neither deleted nor busy.
    ///
    /// With `sequential` the scan runs forward from `start` to `end`.
    /// Otherwise it alternates outward from `current` in both directions,
    /// bounded by the cursors; a `current` outside the window starts the
    /// scan at the nearer window edge. With `same_net_only` each direction stops at
    /// the first entry of a different net.
    pub fn get_connected(
        &self,
        current: SegmentId,
        start: Option<SegmentId>,
        end: Option<SegmentId>,
        which: Endpoint,
        same_net_only: bool,
        sequential: bool,
    ) -> Option<SegmentId> {
        let current_idx = self.index_of(current)?;
        let reference = self.at(current_idx)?;
        let (first, last) = self.cursor_bounds(start, end)?;

        let position = reference.endpoint(which);
        let layers = reference.layer_set();
        let net_code = reference.net_code();

        let attached = |idx: usize| -> Option<SegmentId> {
            let seg = self.at(idx)?;
            let hit = idx != current_idx
                && !seg.is_hidden()
                && layers.intersects(seg.layer_set())
                && (seg.start() == position || seg.end() == position);
            hit.then(|| seg.id())
        };
        let in_net = |idx: usize| self.at(idx).map_or(false, |seg| seg.net_code() == net_code);

        let (mut forward, mut backward) = if sequential {
            (Some(first), None)
        } else {
            let origin = current_idx.clamp(first, last);
            (Some(origin), Some(origin))
        };

        while forward.is_some() || backward.is_some() {
            if same_net_only {
                forward = forward.filter(|&idx| in_net(idx));
                backward = backward.filter(|&idx| in_net(idx));
            }

            if let Some(idx) = forward {
                if let Some(found) = attached(idx) {
                    return Some(found);
                }
                forward = (idx < last && idx + 1 < self.len()).then(|| idx + 1);
            }

            if let Some(idx) = backward {
                if let Some(found) = attached(idx) {
                    return Some(found);
                }
                backward = (idx > first).then(|| idx - 1);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layer;
    use crate::track::{Via, ViaType};

    fn trace(x0: i32, x1: i32, net: i32) -> Segment {
        Segment::track(Point::new(x0, 0), Point::new(x1, 0), 200_000, Layer::F_CU, net)
    }

    #[test]
    fn test_get_track_at_respects_mask() {
        let mut chain = TrackChain::new();
        let id = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let p = Point::new(1_000_000, 0);
        assert_eq!(chain.get_track_at(None, None, p, LayerSet::single(Layer::F_CU)), Some(id));
        assert_eq!(chain.get_track_at(None, None, p, LayerSet::single(Layer::B_CU)), None);
        assert_eq!(chain.get_track_at(None, None, p, LayerSet::ALL), Some(id));
    }

    #[test]
    fn test_get_track_at_skips_hidden() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let b = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        chain.get_mut(a).unwrap().set_busy(true);
        let p = Point::new(0, 0);
        assert_eq!(chain.get_track_at(None, None, p, LayerSet::ALL), Some(b));
        chain.get_mut(b).unwrap().set_deleted(true);
        assert_eq!(chain.get_track_at(None, None, p, LayerSet::ALL), None);
    }

    #[test]
    fn test_get_track_at_ignores_trace_body() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        assert_eq!(chain.get_track_at(None, None, Point::new(500_000, 0), LayerSet::ALL), None);
        assert_eq!(chain.get_track_at(None, None, Point::new(1, 0), LayerSet::ALL), None);
        assert_eq!(chain.get_track_at(None, None, Point::new(0, 0), LayerSet::ALL), Some(a));
    }

    #[test]
    fn test_end_cursor_is_inclusive() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(5_000_000, 6_000_000, 1)).unwrap();
        let b = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let p = Point::new(0, 0);
        assert_eq!(chain.get_track_at(Some(a), Some(b), p, LayerSet::ALL), Some(b));
        assert_eq!(chain.get_track_at(Some(a), Some(a), p, LayerSet::ALL), None);
    }

    #[test]
    fn test_get_via() {
        let mut chain = TrackChain::new();
        chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let blind = Via::new(ViaType::BlindBuried, Layer::F_CU, Layer::inner(1));
        let v = chain.insert(Segment::via(Point::new(0, 0), 600_000, blind, 1)).unwrap();
        assert_eq!(chain.via_at(Point::new(100_000, 0), LayerSet::single(Layer::F_CU)), Some(v));
        assert_eq!(chain.via_at(Point::new(100_000, 0), LayerSet::single(Layer::B_CU)), None);
        assert_eq!(chain.via_at(Point::new(500_000, 0), LayerSet::ALL), None);
    }

    #[test]
    fn test_net_code_bracket() {
        let mut chain = TrackChain::new();
        chain.insert(trace(0, 1, 1)).unwrap();
        let first = chain.insert(trace(0, 1, 2)).unwrap();
        let last = chain.insert(trace(0, 1, 2)).unwrap();
        chain.insert(trace(0, 1, 4)).unwrap();

        assert_eq!(chain.start_net_code(None, 2), Some(first));
        assert_eq!(chain.end_net_code(None, 2), Some(last));
        assert_eq!(chain.start_net_code(None, 3), None);
        assert_eq!(chain.end_net_code(None, 3), None);
        assert_eq!(chain.iter_net(2).count(), 2);
        assert_eq!(chain.iter_net(3).count(), 0);
    }

    #[test]
    fn test_get_connected_both_directions() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let b = chain.insert(trace(1_000_000, 2_000_000, 1)).unwrap();
        let c = chain.insert(trace(2_000_000, 3_000_000, 1)).unwrap();

        assert_eq!(chain.get_connected(b, None, None, Endpoint::Start, false, false), Some(a));
        assert_eq!(chain.get_connected(b, None, None, Endpoint::End, false, false), Some(c));
        assert_eq!(chain.get_connected(a, None, None, Endpoint::Start, false, false), None);
        assert_eq!(chain.get_connected(a, None, None, Endpoint::End, false, true), Some(b));
    }

    #[test]
    fn test_get_connected_same_net_stops_at_boundary() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let b = chain.insert(trace(1_000_000, 2_000_000, 2)).unwrap();

        assert_eq!(chain.get_connected(a, None, None, Endpoint::End, false, false), Some(b));
        assert_eq!(chain.get_connected(a, None, None, Endpoint::End, true, false), None);
    }

    #[test]
    fn test_get_connected_needs_shared_layer() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let mut back = trace(1_000_000, 2_000_000, 1);
        back.set_layer(Layer::B_CU);
        chain.insert(back).unwrap();

        assert_eq!(chain.get_connected(a, None, None, Endpoint::End, false, false), None);
    }

    /// Three traces of net 1 meeting at (1mm, 0), with a net 0 trace ahead of them
    fn star_chain() -> (TrackChain, [SegmentId; 5]) {
        let mut chain = TrackChain::new();
        let head = chain.insert(trace(1_000_000, 4_000_000, 0)).unwrap();
        let a = chain.insert(trace(2_000_000, 1_000_000, 1)).unwrap();
        let b = chain.insert(trace(1_000_000, 3_000_000, 1)).unwrap();
        let c = chain.insert(trace(0, 1_000_000, 1)).unwrap();
        let d = chain.insert(trace(1_000_000, 5_000_000, 1)).unwrap();
        (chain, [head, a, b, c, d])
    }

    #[test]
    fn test_get_connected_modes_return_valid_matches() {
        let (chain, [head, a, b, c, d]) = star_chain();
        let attached_to_c = [head, a, b, d];

        let sequential = chain.get_connected(c, None, None, Endpoint::End, false, true);
        assert_eq!(sequential, Some(head));

        let outward = chain.get_connected(c, None, None, Endpoint::End, false, false).unwrap();
        assert!(attached_to_c.contains(&outward));
        // Nearest neighbours first: d follows c directly
        assert_eq!(outward, d);
    }

    #[test]
    fn test_get_connected_sequential_same_net_stops_at_foreign_head() {
        let (chain, [head, a, _, c, _]) = star_chain();
        assert_eq!(chain.get_connected(c, None, None, Endpoint::End, true, true), None);
        assert_eq!(chain.get_connected(c, Some(a), None, Endpoint::End, true, true), Some(a));
        assert_eq!(chain.get_connected(c, Some(head), None, Endpoint::End, false, true), Some(head));
    }

    #[test]
    fn test_get_connected_honours_cursor_bounds() {
        let (chain, [_, a, b, c, d]) = star_chain();

        // Sequential: the window [b, b] holds exactly one candidate
        assert_eq!(chain.get_connected(c, Some(b), Some(b), Endpoint::End, false, true), Some(b));
        // Sequential: the window [c, d] skips everything ahead of c
        assert_eq!(chain.get_connected(c, Some(c), Some(d), Endpoint::End, false, true), Some(d));

        // Outward: the end cursor at c hides d, the start cursor at b hides a
        assert_eq!(chain.get_connected(c, Some(b), Some(c), Endpoint::End, true, false), Some(b));
        // Outward: with d hidden by the window [a, c], b is the nearest
        assert_eq!(chain.get_connected(c, Some(a), Some(c), Endpoint::End, false, false), Some(b));
        // Outward from a, outside the window [c, c]: b is skipped, c is found
        assert_eq!(chain.get_connected(a, Some(c), Some(c), Endpoint::End, false, false), Some(c));
        assert_eq!(chain.get_connected(a, Some(d), None, Endpoint::End, false, false), Some(d));
    }
}
