//! Track, via and zone-boundary entities
//!
//! # Submodules
//! - `types` - Handles, endpoint selector, via kinds and state flags
//! - `via` - Via payload: layer pair, kind and drill resolution
//! - `segment` - The `Segment` entity shared by all three kinds

mod types;
mod via;
mod segment;

pub use types::{EndHits, Endpoint, SegmentId, StateFlags, ViaType};

pub use via::{Via, UNDEFINED_DRILL_DIAMETER};

pub use segment::{
    DEFAULT_TRACK_WIDTH,
    DEFAULT_VIA_DIAMETER,
    Segment,
    SegmentClass,
    SegmentKind,
    SegmentShape,
};
