use serde::{Deserialize, Serialize};

/// Default strength of a [`crate::force::BoundaryForce`].
pub const DEFAULT_STRENGTH: f32 = 0.2;

/// Default boundary radius: nodes are treated as points.
pub const DEFAULT_RADIUS: f32 = 0.0;

/// Tunable parameters for a force map and the simulation hosting it.
///
/// The grid and force fields are consumed by the core. The alpha and
/// velocity fields are only read by the host's tick loop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub cols: usize,
    pub rows: usize,

    /// Boundary correction strength. Values above ~2 overshoot.
    pub strength: f32,
    /// Uniform boundary radius, used when `use_node_radius` is off.
    pub radius: f32,
    /// Use each node's own radius instead of `radius`.
    pub use_node_radius: bool,

    pub node_count: usize,
    pub node_radius_range: (f32, f32),

    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
}

impl Default for Config {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            cols: 3,
            rows: 2,
            strength: DEFAULT_STRENGTH,
            radius: DEFAULT_RADIUS,
            use_node_radius: true,
            node_count: 300,
            node_radius_range: (2.0, 6.0),
            alpha_min,
            // Reaches alpha_min after ~300 ticks.
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
        }
    }
}
