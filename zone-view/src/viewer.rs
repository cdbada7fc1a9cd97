//! Interactive zone-grid viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the force map, the node
//! simulation and its configuration, and implements [`eframe::App`] to
//! render the grid and let the user resize it.

use eframe::App;
use glam::Vec2;
use rand::{Rng, rng, rngs::ThreadRng};
use zone_core::{
    config::Config,
    error::ValidationError,
    force::Radius,
    grid::ZoneGrid,
    node::Node,
    state::{Container, ForceMap},
    types::ZoneIndex,
    zone_forces::ZoneForces,
};

use crate::engine::Simulation;

/// Container size used before the first frame reports the real panel size.
const INITIAL_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// The drawing area of the central panel, measured each frame.
struct Panel(egui::Rect);

impl Container for Panel {
    fn size(&self) -> Vec2 {
        Vec2::new(self.0.width(), self.0.height())
    }
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The force map: container size and the zone grid derived from it.
/// - The [`Simulation`] hosting one boundary force per zone.
/// - UI state (running flag, pending grid shape, last error).
///
/// Whenever the grid changes, the zone forces are rebuilt from the new
/// grid and bound again; nodes keep their zone unless the grid shape
/// changed, in which case they are reassigned at random.
pub struct Viewer {
    map: ForceMap,
    sim: Simulation,
    cfg: Config,

    rng: ThreadRng,

    running: bool,
    last_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer with the default grid and a fresh node cloud.
    ///
    /// ### Errors
    /// [`ValidationError`] if the default configuration describes an
    /// empty grid.
    pub fn new() -> Result<Self, ValidationError> {
        let cfg = Config::default();
        let map = ForceMap::new(INITIAL_SIZE.x, INITIAL_SIZE.y, cfg.cols, cfg.rows)?;
        let sim = Simulation::new(Vec::new(), &cfg);

        let mut viewer = Self {
            map,
            sim,
            cfg,
            rng: rng(),
            running: true,
            last_error: None,
        };
        viewer.reset();
        Ok(viewer)
    }

    /// Scatters a new node cloud over the whole container, assigns each
    /// node a random zone and restarts the simulation.
    fn reset(&mut self) {
        let state = self.map.state();
        let size = Vec2::new(state.container_width(), state.container_height());
        let mut nodes = Node::scatter_in(
            Vec2::ZERO,
            size,
            self.cfg.node_count,
            self.cfg.node_radius_range,
            &mut self.rng,
        );
        Self::assign_random_zones(&mut nodes, self.map.grid(), &mut self.rng);

        self.sim = Simulation::new(nodes, &self.cfg);
        self.rebuild_forces();
    }

    fn assign_random_zones(nodes: &mut [Node], grid: &ZoneGrid, rng: &mut impl Rng) {
        for node in nodes {
            let zone: ZoneIndex = (
                rng.random_range(0..grid.rows()),
                rng.random_range(0..grid.cols()),
            );
            node.zone = Some(zone);
        }
    }

    fn radius(&self) -> Radius<Node> {
        if self.cfg.use_node_radius {
            Radius::per_node(|n: &Node| n.radius)
        } else {
            Radius::Fixed(self.cfg.radius)
        }
    }

    /// Replaces the simulation's forces with one per zone of the current grid.
    fn rebuild_forces(&mut self) {
        let mut forces = ZoneForces::from_grid(self.map.grid(), self.cfg.strength, self.radius());
        self.sim.clear_forces();
        match forces.bind_assigned(&self.sim.nodes, |n| n.zone) {
            Ok(()) => {
                let zones = forces.len();
                self.sim.add_force(forces);
                log::debug!(
                    "rebuilt {zones} zone forces ({} registered)",
                    self.sim.force_count()
                );
                self.last_error = None;
            }
            Err(e) => {
                log::error!("failed to bind zone forces: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Applies a new container size and/or grid shape.
    ///
    /// Node zones are reassigned if the shape changed. On a validation
    /// error the current grid and forces are kept and the error is shown.
    fn apply_layout(&mut self, panel: &impl Container, cols: Option<usize>, rows: Option<usize>) {
        let shape_before = (self.map.grid().cols(), self.map.grid().rows());

        if let Err(e) = self.map.refresh(panel, cols, rows) {
            log::warn!("keeping previous force map: {e}");
            self.last_error = Some(e.to_string());
            return;
        }

        if (self.map.grid().cols(), self.map.grid().rows()) != shape_before {
            Self::assign_random_zones(&mut self.sim.nodes, self.map.grid(), &mut self.rng);
        }
        self.rebuild_forces();
        self.sim.reheat();
    }

    /// Advances the simulation by a single tick, recording any error.
    fn step_once(&mut self) {
        if let Err(e) = self.sim.tick() {
            log::error!("simulation tick failed: {e}");
            self.last_error = Some(e.to_string());
            self.running = false;
        }
    }

    /// Converts a container position to screen space.
    fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel UI (run controls, stepping, reheating).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reheat").clicked() {
                    self.sim.reheat();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar (alpha, grid shape, errors).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let state = self.map.state();
                ui.label(format!("alpha = {:.4}", self.sim.alpha));
                ui.separator();
                ui.label(format!("nodes = {}", self.sim.nodes.len()));
                ui.label(format!("zones = {}x{}", state.cols(), state.rows()));
                ui.label(format!(
                    "container = {:.0}x{:.0}",
                    state.container_width(), state.container_height()
                ));
                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    /// Builds the right-hand configuration panel. Returns `true` if the
    /// grid shape changed.
    fn ui_config_panel(&mut self, ctx: &egui::Context) -> bool {
        let mut shape_changed = false;
        let mut forces_changed = false;
        let mut sim_changed = false;

        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Grid");
                shape_changed |=
                    Self::labeled_drag_usize(ui, "cols:", &mut self.cfg.cols, 1..=12, 0.05);
                shape_changed |=
                    Self::labeled_drag_usize(ui, "rows:", &mut self.cfg.rows, 1..=12, 0.05);

                ui.separator();
                ui.label("Boundary force");
                forces_changed |= Self::labeled_drag_f32(
                    ui,
                    "strength:",
                    &mut self.cfg.strength,
                    0.0..=2.0,
                    0.01,
                );
                forces_changed |= ui
                    .checkbox(&mut self.cfg.use_node_radius, "use node radius")
                    .changed();
                ui.add_enabled_ui(!self.cfg.use_node_radius, |ui| {
                    forces_changed |= Self::labeled_drag_f32(
                        ui,
                        "radius:",
                        &mut self.cfg.radius,
                        0.0..=50.0,
                        0.1,
                    );
                });

                ui.separator();
                ui.label("Simulation");
                sim_changed |= Self::labeled_drag_f32(
                    ui,
                    "velocity_decay:",
                    &mut self.cfg.velocity_decay,
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_usize(
                    ui,
                    "node_count:",
                    &mut self.cfg.node_count,
                    0..=5000,
                    1.0,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    shape_changed = true;
                    sim_changed = true;
                }
            });

        if sim_changed {
            self.sim.apply_config(&self.cfg);
        }
        if forces_changed && !shape_changed {
            self.rebuild_forces();
            self.sim.reheat();
        }
        shape_changed
    }

    /// Builds the central panel where the grid and nodes are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context, shape_changed: bool) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let panel = Panel(rect);

            let state = self.map.state();
            let resized = panel.size() != Vec2::new(state.container_width(), state.container_height());
            if shape_changed {
                self.apply_layout(&panel, Some(self.cfg.cols), Some(self.cfg.rows));
            } else if resized && rect.width() > 0.0 && rect.height() > 0.0 {
                self.apply_layout(&panel, None, None);
            }

            if self.running && !self.sim.is_settled() {
                self.step_once();
                ctx.request_repaint();
            }

            let painter = ui.painter_at(rect);
            let grid_stroke = egui::Stroke::new(1.0, egui::Color32::DARK_GRAY);

            // Draw zones.
            for zone in self.map.grid().iter() {
                let zr = egui::Rect::from_min_max(
                    Self::to_screen(zone.min(), rect),
                    Self::to_screen(zone.max(), rect),
                );
                painter.rect_stroke(zr, 0.0, grid_stroke, egui::StrokeKind::Inside);
            }

            // Draw nodes, colored by assigned zone.
            let cols = self.map.grid().cols();
            for node in &self.sim.nodes {
                let p = Self::to_screen(node.pos, rect);
                let color = match node.zone {
                    Some((row, col)) => zone_color(row * cols + col),
                    None => egui::Color32::GRAY,
                };
                painter.circle_filled(p, node.radius.max(1.0), color);
            }
        });
    }
}

/// A distinct hue per zone index.
fn zone_color(i: usize) -> egui::Color32 {
    let hue = (i as f32 * 0.618_034).fract();
    egui::ecolor::Hsva::new(hue, 0.6, 0.9, 1.0).into()
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        let shape_changed = self.ui_config_panel(ctx);
        self.ui_central_panel(ctx, shape_changed);
    }
}
