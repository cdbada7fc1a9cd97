//! Error types for grid construction and force stepping.

use crate::types::NodeId;
use thiserror::Error;

/// A grid precondition that did not hold.
///
/// Returned by [`crate::grid::ZoneGrid::new`] and everything built on it.
/// No partial grid is ever produced alongside one of these.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("force map container width must be finite and greater than 0, got {0}")]
    InvalidWidth(f32),
    #[error("force map container height must be finite and greater than 0, got {0}")]
    InvalidHeight(f32),
    #[error("force map column count must be greater than 0")]
    ZeroColumns,
    #[error("force map row count must be greater than 0")]
    ZeroRows,
}

/// Failure while applying a [`crate::force::BoundaryForce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForceError {
    #[error("boundary force stepped before any nodes were bound")]
    Unbound,
    #[error("bound node {id} is out of range for a node slice of length {len}")]
    NodeOutOfRange { id: NodeId, len: usize },
    #[error("velocity buffer holds {buffer} slots but the node slice has {nodes}")]
    BufferLength { buffer: usize, nodes: usize },
    #[error("zone ({row}, {col}) does not exist in this force set")]
    NoSuchZone { row: usize, col: usize },
}
