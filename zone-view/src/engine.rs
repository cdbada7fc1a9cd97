//! A minimal force-layout tick loop hosting the zone forces.
//!
//! Each [`Simulation::tick`]:
//! 1. Cools `alpha` toward `alpha_target` by `alpha_decay`.
//! 2. Lets every registered [`Force`] adjust node velocities.
//! 3. Damps velocities by `velocity_decay` and integrates positions.

use zone_core::{config::Config, error::ForceError, force::Force, node::Node};

pub struct Simulation {
    pub nodes: Vec<Node>,
    forces: Vec<Box<dyn Force<Node>>>,

    pub alpha: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub alpha_target: f32,
    pub velocity_decay: f32,
}

impl Simulation {
    pub fn new(nodes: Vec<Node>, cfg: &Config) -> Self {
        Self {
            nodes,
            forces: Vec::new(),
            alpha: 1.0,
            alpha_min: cfg.alpha_min,
            alpha_decay: cfg.alpha_decay,
            alpha_target: 0.0,
            velocity_decay: cfg.velocity_decay,
        }
    }

    /// Takes the cooling and damping parameters from `cfg`, keeping the
    /// nodes, forces and current alpha.
    pub fn apply_config(&mut self, cfg: &Config) {
        self.alpha_min = cfg.alpha_min;
        self.alpha_decay = cfg.alpha_decay;
        self.velocity_decay = cfg.velocity_decay;
    }

    pub fn add_force(&mut self, force: impl Force<Node> + 'static) {
        self.forces.push(Box::new(force));
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Restarts cooling from full heat.
    pub fn reheat(&mut self) {
        self.alpha = 1.0;
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < self.alpha_min
    }

    /// Advances the simulation by one step.
    ///
    /// ### Errors
    /// The first error any force returns. Positions are not integrated on
    /// failure.
    pub fn tick(&mut self) -> Result<(), ForceError> {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        for force in &self.forces {
            force.apply(self.alpha, &mut self.nodes)?;
        }

        let keep = 1.0 - self.velocity_decay;
        for node in &mut self.nodes {
            node.vel *= keep;
            node.pos += node.vel;
        }
        Ok(())
    }
}
