//! Copper track, via and zone-boundary model for PCB layout
//!
//! Segments live in a `TrackChain` kept sorted by net code. The chain
//! answers connectivity questions (what touches this endpoint, where does a
//! routed path end, where does a net's run start) and hands individual
//! segments to the geometry layer for hit testing and clearance polygons.
//!
//! # Modules
//! - `board` - Layers, design settings and the `Board` container
//! - `track` - The `Segment` entity and its via payload
//! - `geometry` - Points, rectangles, shape queries and polygon generation
//! - `chain` - The net-ordered chain and its searches
//! - `library` - Footprint library tree pane
//! - `error` - Chain mutation errors

pub mod board;
pub mod chain;
pub mod error;
pub mod geometry;
pub mod library;
pub mod track;

pub use board::{Board, DesignSettings, Layer, LayerSet};
pub use chain::{ChainSpatialIndex, PathEnds, TrackChain};
pub use error::ChainError;
pub use geometry::{Point, PolygonSet, Rect};
pub use track::{EndHits, Endpoint, Segment, SegmentClass, SegmentId, Via, ViaType};
