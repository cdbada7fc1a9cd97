//! Zone grids and boundary-confinement forces for 2-D force layouts.
//!
//! Main components:
//! - [`grid`] — splitting a container into a row-major grid of equal zones.
//! - [`zone`] — a single rectangular zone.
//! - [`state`] — force map snapshots and resizing.
//! - [`force`] — the per-zone boundary force and the [`force::Force`] trait.
//! - [`zone_forces`] — one boundary force per zone of a grid.
//! - [`velocity_buffer`] — per-node velocity accumulation for split evaluation.
//! - [`node`] — the node trait forces act on, plus a plain node type.
//! - [`config`] — tunable parameters and defaults.
//! - [`error`] — validation and force errors.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod error;
pub mod force;
pub mod grid;
pub mod node;
pub mod state;
pub mod types;
pub mod velocity_buffer;
pub mod zone;
pub mod zone_forces;
