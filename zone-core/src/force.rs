//! Velocity forces that keep nodes inside their zone.
//!
//! A [`BoundaryForce`] is created for one [`Zone`], bound to the ids of
//! the nodes assigned to that zone, and then stepped once per simulation
//! tick with the current alpha. It only ever changes velocities.

use crate::{
    config::{DEFAULT_RADIUS, DEFAULT_STRENGTH},
    error::ForceError,
    node::SimNode,
    types::NodeId,
    velocity_buffer::VelocityBuffer,
    zone::Zone,
};
use glam::Vec2;
use std::{fmt, sync::Arc};

/// A force contribution the host simulation calls once per tick.
pub trait Force<N: SimNode> {
    fn apply(&self, alpha: f32, nodes: &mut [N]) -> Result<(), ForceError>;
}

/// How far a node reaches past its position when tested against a zone edge.
pub enum Radius<N> {
    /// Same radius for every node.
    Fixed(f32),
    /// Evaluated for each node on every step; never cached.
    PerNode(Arc<dyn Fn(&N) -> f32 + Send + Sync>),
}

impl<N> Radius<N> {
    pub fn per_node(f: impl Fn(&N) -> f32 + Send + Sync + 'static) -> Self {
        Radius::PerNode(Arc::new(f))
    }

    /// Radius for `node`, calling the function for [`Radius::PerNode`].
    #[inline]
    pub fn of(&self, node: &N) -> f32 {
        match self {
            Radius::Fixed(r) => *r,
            Radius::PerNode(f) => f(node),
        }
    }
}

impl<N> Clone for Radius<N> {
    fn clone(&self) -> Self {
        match self {
            Radius::Fixed(r) => Radius::Fixed(*r),
            Radius::PerNode(f) => Radius::PerNode(Arc::clone(f)),
        }
    }
}

impl<N> Default for Radius<N> {
    fn default() -> Self {
        Radius::Fixed(DEFAULT_RADIUS)
    }
}

impl<N> From<f32> for Radius<N> {
    fn from(r: f32) -> Self {
        Radius::Fixed(r)
    }
}

impl<N> fmt::Debug for Radius<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radius::Fixed(r) => f.debug_tuple("Fixed").field(r).finish(),
            Radius::PerNode(_) => f.write_str("PerNode(..)"),
        }
    }
}

/// Pulls bound nodes back toward the inside of one zone.
///
/// For every bound node, each of the four edges is tested on its own.
/// When the node (inflated by its radius) is past an edge, the velocity
/// along that axis is pushed back by `depth * strength * alpha`, where
/// `depth` is how far past the edge it reaches. A node past two edges at
/// a corner receives both corrections in the same step.
///
/// Strengths above roughly 2 overshoot and oscillate; this is not
/// checked. Alpha is used as given.
///
/// The force holds node ids, not nodes: the host passes its node slice to
/// every [`BoundaryForce::step`]. The zone is copied in at construction,
/// so rebuilding a grid does not move forces made from the old one.
#[derive(Debug, Clone)]
pub struct BoundaryForce<N> {
    zone: Zone,
    strength: f32,
    radius: Radius<N>,
    nodes: Option<Vec<NodeId>>,
}

impl<N: SimNode> BoundaryForce<N> {
    /// A force for `zone` with strength `0.2` and point-sized nodes.
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            strength: DEFAULT_STRENGTH,
            radius: Radius::default(),
            nodes: None,
        }
    }

    /// Sets the correction strength.
    ///
    /// ### Parameters
    /// - `strength` - Fraction of the penetration depth removed per unit
    ///   alpha each step. Values above ~2 overshoot.
    ///
    /// ### Returns
    /// The force with the new strength.
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Sets how far nodes reach past their position, either a fixed
    /// `f32` or a [`Radius::PerNode`] function.
    pub fn with_radius(mut self, radius: impl Into<Radius<N>>) -> Self {
        self.radius = radius.into();
        self
    }

    /// The zone this force confines to, as copied at construction.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn radius(&self) -> &Radius<N> {
        &self.radius
    }

    /// Sets the nodes this force acts on, replacing any earlier binding.
    ///
    /// ### Parameters
    /// - `ids` - Indices into the node slice later passed to
    ///   [`BoundaryForce::step`]. They are checked there, not here. An
    ///   empty set is a valid binding.
    pub fn bind(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let ids: Vec<NodeId> = ids.into_iter().collect();
        log::debug!(
            "binding {} nodes to zone [{}, {}] x [{}, {}]",
            ids.len(),
            self.zone.left,
            self.zone.right,
            self.zone.top,
            self.zone.bottom
        );
        self.nodes = Some(ids);
    }

    /// The bound node ids, or `None` before the first [`BoundaryForce::bind`].
    pub fn bound(&self) -> Option<&[NodeId]> {
        self.nodes.as_deref()
    }

    /// Applies one correction pass to every bound node.
    ///
    /// ### Parameters
    /// - `alpha` - Current simulation alpha; scales every correction and
    ///   is neither validated nor clamped.
    /// - `nodes` - The host's node slice. Only velocities of bound nodes
    ///   are written.
    ///
    /// ### Errors
    /// - [`ForceError::Unbound`] if [`BoundaryForce::bind`] was never called.
    /// - [`ForceError::NodeOutOfRange`] if a bound id is not in `nodes`.
    ///
    /// Both are detected before any velocity changes.
    pub fn step(&self, alpha: f32, nodes: &mut [N]) -> Result<(), ForceError> {
        let ids = self.checked_ids(nodes.len())?;
        log::trace!("boundary step over {} nodes, alpha = {alpha}", ids.len());
        for &id in ids {
            let node = &mut nodes[id];
            let pos = node.position();
            let r = self.radius.of(node);
            self.correct(pos, r, alpha, node.velocity_mut());
        }
        Ok(())
    }

    /// Computes the same corrections as [`BoundaryForce::step`] into `out`
    /// instead of writing the nodes.
    ///
    /// Only nodes past at least one edge are recorded.
    ///
    /// ### Parameters
    /// - `alpha` - Current simulation alpha, used as given.
    /// - `nodes` - The host's node slice; only positions are read.
    /// - `out` - Buffer sized to `nodes.len()`, e.g. via
    ///   [`VelocityBuffer::ensure_len`].
    ///
    /// ### Errors
    /// - [`ForceError::BufferLength`] if `out` and `nodes` differ in length.
    /// - The same errors as [`BoundaryForce::step`].
    pub fn accumulate(
        &self,
        alpha: f32,
        nodes: &[N],
        out: &mut VelocityBuffer,
    ) -> Result<(), ForceError> {
        if out.len() != nodes.len() {
            return Err(ForceError::BufferLength {
                buffer: out.len(),
                nodes: nodes.len(),
            });
        }
        let ids = self.checked_ids(nodes.len())?;
        for &id in ids {
            let node = &nodes[id];
            let mut delta = Vec2::ZERO;
            if self.correct(node.position(), self.radius.of(node), alpha, &mut delta) {
                out.add(id, delta);
            }
        }
        Ok(())
    }

    pub(crate) fn checked_ids(&self, len: usize) -> Result<&[NodeId], ForceError> {
        let ids = self.nodes.as_deref().ok_or(ForceError::Unbound)?;
        if let Some(&id) = ids.iter().find(|&&id| id >= len) {
            return Err(ForceError::NodeOutOfRange { id, len });
        }
        Ok(ids)
    }

    /// Adds the edge corrections for a node at `pos` to `vel`. Returns
    /// whether any edge was crossed.
    #[inline]
    fn correct(&self, pos: Vec2, r: f32, alpha: f32, vel: &mut Vec2) -> bool {
        let z = &self.zone;
        let k = self.strength;
        let mut hit = false;

        if pos.x + r > z.right {
            vel.x -= (pos.x - z.right + r) * k * alpha;
            hit = true;
        }
        if pos.x - r < z.left {
            vel.x += (z.left - pos.x + r) * k * alpha;
            hit = true;
        }
        if pos.y + r > z.bottom {
            vel.y -= (pos.y - z.bottom + r) * k * alpha;
            hit = true;
        }
        if pos.y - r < z.top {
            vel.y += (z.top - pos.y + r) * k * alpha;
            hit = true;
        }
        hit
    }
}

impl<N: SimNode> Force<N> for BoundaryForce<N> {
    fn apply(&self, alpha: f32, nodes: &mut [N]) -> Result<(), ForceError> {
        self.step(alpha, nodes)
    }
}
