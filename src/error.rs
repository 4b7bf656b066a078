//! Error types for chain mutations

use thiserror::Error;

use crate::track::SegmentId;

/// Failure of a chain mutation that was handed a caller-supplied handle or position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The handle is not in this chain
    #[error("segment {0} is not in the chain")]
    UnknownSegment(SegmentId),

    /// A segment with this handle is already in the chain
    #[error("segment {0} is already in the chain")]
    DuplicateSegment(SegmentId),

    /// Inserting here would break the ascending net-code order
    #[error("net code {net_code} cannot be inserted at position {position}")]
    OutOfOrder {
        /// Net code of the rejected segment
        net_code: i32,
        /// Chain index the caller asked for
        position: usize,
    },
}
