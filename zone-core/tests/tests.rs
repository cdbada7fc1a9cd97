use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use zone_core::error::ValidationError;
use zone_core::force::{BoundaryForce, Radius};
use zone_core::grid::ZoneGrid;
use zone_core::node::Node;
use zone_core::state::ForceMapState;
use zone_core::zone::Zone;
use zone_core::zone_forces::ZoneForces;

const EPS: f32 = 1e-3;

/// Seeded random grid shapes covering uneven divisions.
fn random_shapes(seed: u64, count: usize) -> Vec<(f32, f32, usize, usize)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (
                rng.random_range(1.0..2000.0),
                rng.random_range(1.0..2000.0),
                rng.random_range(1..=13),
                rng.random_range(1..=13),
            )
        })
        .collect()
}

/// Simple damped tick loop standing in for a host simulation.
fn run_ticks(forces: &ZoneForces<Node>, nodes: &mut [Node], ticks: usize) {
    let mut alpha = 1.0_f32;
    for _ in 0..ticks {
        forces.step_all(alpha, nodes).unwrap();
        for n in nodes.iter_mut() {
            n.vel *= 0.6;
            n.pos += n.vel;
        }
        alpha += (0.0 - alpha) * 0.0228;
    }
}

// ==================================================================================
// Grid tests
// ==================================================================================

#[test]
fn grids_tile_the_container() {
    for (w, h, cols, rows) in random_shapes(1, 200) {
        let grid = ZoneGrid::new(w, h, cols, rows).unwrap();

        for r in 0..rows {
            for c in 0..cols {
                let z = grid.get(r, c).unwrap();
                if c + 1 < cols {
                    let next = grid.get(r, c + 1).unwrap();
                    assert!((z.right - next.left).abs() < EPS, "gap at ({r}, {c})");
                }
                if r + 1 < rows {
                    let below = grid.get(r + 1, c).unwrap();
                    assert!((z.bottom - below.top).abs() < EPS, "gap at ({r}, {c})");
                }
            }
        }

        let first = grid.get(0, 0).unwrap();
        let last = grid.get(rows - 1, cols - 1).unwrap();
        assert_eq!((first.left, first.top), (0.0, 0.0));
        assert!((last.right - w).abs() < EPS);
        assert!((last.bottom - h).abs() < EPS);

        let area: f32 = grid.iter().map(|z| z.width * z.height).sum();
        assert!((area - w * h).abs() / (w * h) < 1e-4);
    }
}

#[test]
fn zones_are_uniform_with_exact_centers() {
    for (w, h, cols, rows) in random_shapes(2, 200) {
        let grid = ZoneGrid::new(w, h, cols, rows).unwrap();
        let zw = w / cols as f32;
        let zh = h / rows as f32;

        for z in grid.iter() {
            assert_eq!(z.width, zw);
            assert_eq!(z.height, zh);
            assert!((z.width - (z.right - z.left)).abs() < EPS);
            assert!((z.height - (z.bottom - z.top)).abs() < EPS);
            assert_eq!(z.center.x, (z.left + z.right) / 2.0);
            assert_eq!(z.center.y, (z.top + z.bottom) / 2.0);
        }
    }
}

#[test]
fn grid_construction_is_deterministic() {
    let a = ZoneGrid::new(1023.0, 767.0, 7, 5).unwrap();
    let b = ZoneGrid::new(1023.0, 767.0, 7, 5).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_dimensions_and_counts_are_rejected() {
    assert!(ZoneGrid::new(0.0, 100.0, 2, 2).is_err());
    assert!(ZoneGrid::new(100.0, 0.0, 2, 2).is_err());
    assert!(ZoneGrid::new(-100.0, 100.0, 2, 2).is_err());
    assert!(ZoneGrid::new(100.0, -1.0, 2, 2).is_err());
    assert_eq!(
        ZoneGrid::new(100.0, 100.0, 0, 2),
        Err(ValidationError::ZeroColumns)
    );
    assert_eq!(
        ZoneGrid::new(100.0, 100.0, 2, 0),
        Err(ValidationError::ZeroRows)
    );

    let single = ZoneGrid::new(100.0, 50.0, 1, 1).unwrap();
    assert_eq!(
        *single.get(0, 0).unwrap(),
        Zone::from_edges(0.0, 100.0, 0.0, 50.0)
    );
}

#[test]
fn error_messages_name_the_failed_precondition() {
    let msg = ZoneGrid::new(10.0, 10.0, 0, 1).unwrap_err().to_string();
    assert!(msg.contains("column"), "{msg}");
    let msg = ZoneGrid::new(10.0, -3.0, 1, 1).unwrap_err().to_string();
    assert!(msg.contains("height"), "{msg}");
}

#[test]
fn resize_with_same_inputs_reproduces_the_grid() {
    for (w, h, cols, rows) in random_shapes(3, 50) {
        let state = ForceMapState::new(w, h, cols, rows).unwrap();
        assert_eq!(state.resized(w, h, None, None).unwrap(), state);
    }
}

// ==================================================================================
// Boundary force scenarios
// ==================================================================================

#[test]
fn single_step_corrects_by_penetration_depth() {
    let zone = Zone::from_edges(0.0, 100.0, 0.0, 100.0);
    let mut nodes = vec![Node::at(Vec2::new(120.0, 50.0))];
    let mut force = BoundaryForce::new(zone).with_strength(0.2);
    force.bind([0]);

    force.step(1.0, &mut nodes).unwrap();

    assert_eq!(nodes[0].vel.x, -4.0);
    assert_eq!(nodes[0].vel.y, 0.0);
}

#[test]
fn scattered_nodes_settle_into_their_zones() {
    let mut rng = StdRng::seed_from_u64(42);
    let grid = ZoneGrid::new(600.0, 400.0, 3, 2).unwrap();

    let mut nodes = Node::scatter_in(Vec2::ZERO, Vec2::new(600.0, 400.0), 120, (1.0, 4.0), &mut rng);
    for n in nodes.iter_mut() {
        n.zone = Some((rng.random_range(0..2), rng.random_range(0..3)));
    }

    let mut forces = ZoneForces::from_grid(&grid, 0.2, Radius::per_node(|n: &Node| n.radius));
    forces.bind_assigned(&nodes, |n| n.zone).unwrap();

    run_ticks(&forces, &mut nodes, 300);

    for n in &nodes {
        let (row, col) = n.zone.unwrap();
        let zone = grid.get(row, col).unwrap();
        // Allow a small residual where alpha has decayed.
        let slack = 2.0;
        assert!(
            n.pos.x > zone.left - slack && n.pos.x < zone.right + slack,
            "x = {} outside [{}, {}]",
            n.pos.x,
            zone.left,
            zone.right
        );
        assert!(
            n.pos.y > zone.top - slack && n.pos.y < zone.bottom + slack,
            "y = {} outside [{}, {}]",
            n.pos.y,
            zone.top,
            zone.bottom
        );
    }
}

#[test]
fn forces_keep_old_geometry_after_resize() {
    let state = ForceMapState::new(200.0, 100.0, 2, 1).unwrap();
    let forces: ZoneForces<Node> = ZoneForces::from_grid(state.grid(), 0.2, Radius::default());

    let bigger = state.resized(400.0, 100.0, None, None).unwrap();
    assert_eq!(forces.get(0, 1).unwrap().zone().right, 200.0);
    assert_eq!(bigger.grid().get(0, 1).unwrap().right, 400.0);

    let rebuilt: ZoneForces<Node> = ZoneForces::from_grid(bigger.grid(), 0.2, Radius::default());
    assert_eq!(rebuilt.get(0, 1).unwrap().zone().right, 400.0);
}
