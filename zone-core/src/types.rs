/// Identifier for a node in the host simulation's node slice.
///
/// This is an index into whatever `&mut [N]` the host passes to
/// [`crate::force::BoundaryForce::step`], and is only meaningful for
/// that slice.
pub type NodeId = usize;

/// Position of a zone inside a [`crate::grid::ZoneGrid`], as `(row, col)`.
pub type ZoneIndex = (usize, usize);
