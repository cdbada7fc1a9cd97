use crate::types::ZoneIndex;
use glam::Vec2;
use rand::Rng;

/// A simulated point a boundary force can act on.
///
/// Forces read the position and adjust the velocity; integrating
/// velocity into position is left to the host simulation.
pub trait SimNode {
    fn position(&self) -> Vec2;
    fn velocity_mut(&mut self) -> &mut Vec2;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Zone the host assigned this node to, if any.
    pub zone: Option<ZoneIndex>,
}

impl SimNode for Node {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    fn velocity_mut(&mut self) -> &mut Vec2 {
        &mut self.vel
    }
}

impl Node {
    /// A resting point node at `pos` with no zone assigned.
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: 0.0,
            zone: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Scatters resting nodes uniformly over a rectangle.
    ///
    /// ### Parameters
    /// - `min`, `max` - Opposite corners of the rectangle, `min <= max`.
    /// - `count` - Number of nodes to create.
    /// - `radius_range` - Inclusive `(low, high)` range radii are drawn from.
    /// - `rng` - Random source.
    ///
    /// ### Returns
    /// `count` nodes with zero velocity and no zone assigned.
    ///
    /// ### Panics
    /// Panics if a range is inverted, as [`Rng::random_range`] does.
    pub fn scatter_in(
        min: Vec2,
        max: Vec2,
        count: usize,
        radius_range: (f32, f32),
        rng: &mut impl Rng,
    ) -> Vec<Self> {
        (0..count)
            .map(|_| {
                let x = rng.random_range(min.x..=max.x);
                let y = rng.random_range(min.y..=max.y);
                let r = rng.random_range(radius_range.0..=radius_range.1);
                Node::at(Vec2::new(x, y)).with_radius(r)
            })
            .collect()
    }
}
