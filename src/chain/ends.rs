//! Free-end detection for a run of connected segments
//!
//! A run is `count` consecutive chain entries starting at a given handle,
//! typically one routed path of a single net. Vias in the run are not path
//! segments, but a via sitting on a segment endpoint joins the layers it
//! spans, so a trace on the other side of the via still counts as attached.

use super::TrackChain;
use crate::board::LayerSet;
use crate::error::ChainError;
use crate::geometry::Point;
use crate::track::{Endpoint, SegmentId};

/// Outcome of a free-end search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnds {
    /// The run has two free endpoints; `start` holds the first one found in
    /// chain order, `end` the second. Both may be the same segment.
    Open { start: SegmentId, end: SegmentId },
    /// Fewer than two free endpoints were found
    ClosedLoop,
}

type FreeEnd = (SegmentId, Endpoint);

impl TrackChain {
    /// Find the two free ends of the run of `count` entries starting at `first`
    pub fn get_end_segments(&self, first: SegmentId, count: usize) -> Result<PathEnds, ChainError> {
        Ok(match self.scan_free_ends(first, count)? {
            Some(((start, _), (end, _))) => PathEnds::Open { start, end },
            None => PathEnds::ClosedLoop,
        })
    }

    /// Like `get_end_segments`, then orient the two boundary segments so the
    /// start segment's `start` and the end segment's `end` are the free ends
    pub fn orient_path_ends(&mut self, first: SegmentId, count: usize) -> Result<PathEnds, ChainError> {
        let Some(((start, start_free), (end, end_free))) = self.scan_free_ends(first, count)? else {
            return Ok(PathEnds::ClosedLoop);
        };

        if start != end {
            if start_free == Endpoint::End {
                if let Some(seg) = self.get_mut(start) {
                    seg.swap_ends();
                }
            }
            if end_free == Endpoint::Start {
                if let Some(seg) = self.get_mut(end) {
                    seg.swap_ends();
                }
            }
        }
        Ok(PathEnds::Open { start, end })
    }

    fn scan_free_ends(&self, first: SegmentId, count: usize) -> Result<Option<(FreeEnd, FreeEnd)>, ChainError> {
        let first_idx = self.index_of(first).ok_or(ChainError::UnknownSegment(first))?;
        if count <= 1 {
            return Ok(Some(((first, Endpoint::Start), (first, Endpoint::End))));
        }
        let last_idx = first_idx.saturating_add(count).min(self.len()) - 1;

        let mut found: Option<FreeEnd> = None;
        for idx in first_idx..=last_idx {
            let Some(seg) = self.at(idx) else { break };
            if seg.is_via() {
                continue;
            }

            for which in [Endpoint::Start, Endpoint::End] {
                let position = seg.endpoint(which);
                let mut mask = seg.layer_set();
                let mut exclude = vec![seg.id()];

                if let Some(via) = self.via_in_run(first_idx, last_idx, position, mask) {
                    if let Some(v) = self.get(via) {
                        mask = mask.union(v.layer_set());
                    }
                    exclude.push(via);
                }

                if self.endpoint_in_run(first_idx, last_idx, position, mask, &exclude) {
                    continue;
                }

                match found {
                    None => found = Some((seg.id(), which)),
                    Some(start) => {
                        tracing::debug!(start = %start.0, end = %seg.id(), "path ends found");
                        return Ok(Some((start, (seg.id(), which))));
                    }
                }
            }
        }

        tracing::debug!(%first, count, "no free path ends; closed loop");
        Ok(None)
    }

    fn via_in_run(&self, from: usize, to: usize, position: Point, mask: LayerSet) -> Option<SegmentId> {
        (from..=to)
            .filter_map(|idx| self.at(idx))
            .find(|seg| {
                seg.is_via()
                    && !seg.is_hidden()
                    && mask.intersects(seg.layer_set())
                    && seg.hit_test(position)
            })
            .map(|seg| seg.id())
    }

    fn endpoint_in_run(
        &self,
        from: usize,
        to: usize,
        position: Point,
        mask: LayerSet,
        exclude: &[SegmentId],
    ) -> bool {
        (from..=to).filter_map(|idx| self.at(idx)).any(|seg| {
            !exclude.contains(&seg.id())
                && !seg.is_hidden()
                && mask.intersects(seg.layer_set())
                && (seg.start() == position || seg.end() == position)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layer;
    use crate::track::{Segment, Via};

    fn trace(a: (i32, i32), b: (i32, i32), layer: Layer) -> Segment {
        Segment::track(Point::new(a.0, a.1), Point::new(b.0, b.1), 200_000, layer, 3)
    }

    #[test]
    fn test_single_entry_run() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace((0, 0), (10, 0), Layer::F_CU)).unwrap();
        assert_eq!(chain.get_end_segments(a, 1).unwrap(), PathEnds::Open { start: a, end: a });
    }

    #[test]
    fn test_oversized_count_stops_at_chain_end() {
        let mut chain = TrackChain::new();
        chain.insert(trace((5_000_000, 0), (6_000_000, 0), Layer::F_CU)).unwrap();
        let b = chain.insert(trace((0, 0), (1_000_000, 0), Layer::F_CU)).unwrap();
        let c = chain.insert(trace((1_000_000, 0), (2_000_000, 0), Layer::F_CU)).unwrap();

        assert_eq!(chain.get_end_segments(b, usize::MAX).unwrap(), PathEnds::Open { start: b, end: c });
        assert_eq!(chain.orient_path_ends(b, usize::MAX).unwrap(), PathEnds::Open { start: b, end: c });
    }

    #[test]
    fn test_unknown_first_is_error() {
        let chain = TrackChain::new();
        let stray = Segment::track(Point::new(0, 0), Point::new(1, 0), 1, Layer::F_CU, 0);
        assert!(chain.get_end_segments(stray.id(), 3).is_err());
    }

    #[test]
    fn test_via_bridges_layers() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace((0, 0), (1_000_000, 0), Layer::F_CU)).unwrap();
        chain
            .insert(Segment::via(Point::new(1_000_000, 0), 600_000, Via::default(), 3))
            .unwrap();
        let c = chain
            .insert(trace((1_000_000, 0), (2_000_000, 0), Layer::B_CU))
            .unwrap();

        assert_eq!(chain.get_end_segments(a, 3).unwrap(), PathEnds::Open { start: a, end: c });
    }

    #[test]
    fn test_orient_swaps_reversed_ends() {
        let mut chain = TrackChain::new();
        let a = chain.insert(trace((1_000_000, 0), (0, 0), Layer::F_CU)).unwrap();
        let b = chain
            .insert(trace((2_000_000, 0), (1_000_000, 0), Layer::F_CU))
            .unwrap();

        assert_eq!(chain.orient_path_ends(a, 2).unwrap(), PathEnds::Open { start: a, end: b });
        // a's free end (0, 0) moved to its start, b's free end (2mm, 0) to its end
        assert_eq!(chain.get(a).unwrap().start(), Point::new(0, 0));
        assert_eq!(chain.get(b).unwrap().end(), Point::new(2_000_000, 0));
    }
}
