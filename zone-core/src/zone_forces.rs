//! One [`BoundaryForce`] per zone of a grid.

use crate::{
    error::ForceError,
    force::{BoundaryForce, Force, Radius},
    grid::ZoneGrid,
    node::SimNode,
    types::{NodeId, ZoneIndex},
    velocity_buffer::VelocityBuffer,
};

/// Boundary forces for every zone of a [`ZoneGrid`], in row-major order.
///
/// The set is a snapshot of the grid it was built from. After the grid is
/// rebuilt (for example on resize) the host builds a new set and binds it
/// again.
#[derive(Debug, Clone)]
pub struct ZoneForces<N> {
    forces: Vec<BoundaryForce<N>>,
    cols: usize,
    rows: usize,
}

impl<N: SimNode> ZoneForces<N> {
    /// Creates one unbound [`BoundaryForce`] per zone of `grid`.
    ///
    /// ### Parameters
    /// - `grid` - Grid whose zones are copied into the forces.
    /// - `strength` - Strength shared by every force.
    /// - `radius` - Radius policy shared by every force.
    ///
    /// ### Returns
    /// A set with `grid.len()` forces in row-major order, none bound yet.
    pub fn from_grid(grid: &ZoneGrid, strength: f32, radius: Radius<N>) -> Self {
        let forces = grid
            .iter()
            .map(|zone| {
                BoundaryForce::new(*zone)
                    .with_strength(strength)
                    .with_radius(radius.clone())
            })
            .collect();

        Self {
            forces,
            cols: grid.cols(),
            rows: grid.rows(),
        }
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// The force for zone `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&BoundaryForce<N>> {
        self.index(row, col).map(|i| &self.forces[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundaryForce<N>> {
        self.forces.iter()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Binds the force of zone `(row, col)` to `ids`.
    ///
    /// ### Errors
    /// [`ForceError::NoSuchZone`] if the zone is outside the grid.
    pub fn bind_zone(
        &mut self,
        row: usize,
        col: usize,
        ids: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), ForceError> {
        let i = self
            .index(row, col)
            .ok_or(ForceError::NoSuchZone { row, col })?;
        self.forces[i].bind(ids);
        Ok(())
    }

    /// Binds every force to the nodes `zone_of` assigns to its zone.
    ///
    /// ### Parameters
    /// - `nodes` - The host's node slice; ids are positions in it.
    /// - `zone_of` - The host's assignment of a node to a zone.
    ///
    /// Nodes mapped to `None` are left free. Every force ends up bound,
    /// possibly to no nodes. Nothing is rebound if any node names a zone
    /// outside the grid.
    pub fn bind_assigned(
        &mut self,
        nodes: &[N],
        zone_of: impl Fn(&N) -> Option<ZoneIndex>,
    ) -> Result<(), ForceError> {
        let mut groups: Vec<Vec<NodeId>> = vec![Vec::new(); self.forces.len()];
        for (id, node) in nodes.iter().enumerate() {
            if let Some((row, col)) = zone_of(node) {
                let i = self
                    .index(row, col)
                    .ok_or(ForceError::NoSuchZone { row, col })?;
                groups[i].push(id);
            }
        }

        for (force, ids) in self.forces.iter_mut().zip(groups) {
            force.bind(ids);
        }
        Ok(())
    }

    /// Steps every zone's force. All bindings are checked against `nodes`
    /// first, so an error leaves every velocity unchanged.
    pub fn step_all(&self, alpha: f32, nodes: &mut [N]) -> Result<(), ForceError> {
        for force in &self.forces {
            force.checked_ids(nodes.len())?;
        }
        for force in &self.forces {
            force.step(alpha, nodes)?;
        }
        Ok(())
    }

    /// Accumulates every zone's corrections into `out`, resized and
    /// cleared to `nodes.len()` first.
    pub fn accumulate_all(
        &self,
        alpha: f32,
        nodes: &[N],
        out: &mut VelocityBuffer,
    ) -> Result<(), ForceError> {
        out.ensure_len(nodes.len());
        for force in &self.forces {
            force.accumulate(alpha, nodes, out)?;
        }
        Ok(())
    }
}

impl<N: SimNode> Force<N> for ZoneForces<N> {
    fn apply(&self, alpha: f32, nodes: &mut [N]) -> Result<(), ForceError> {
        self.step_all(alpha, nodes)
    }
}
