//! Force map state: the current container size and the grid derived from it.
//!
//! [`ForceMapState`] is an immutable snapshot. Resizing produces a new
//! snapshot through [`ForceMapState::resized`]; [`ForceMap`] holds the
//! current one and swaps it only when the new one is valid.

use crate::{error::ValidationError, grid::ZoneGrid};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Something with a measurable on-screen size, such as a layout panel.
///
/// The force map reads the size whenever it is refreshed and never
/// keeps a reference to the container.
pub trait Container {
    fn size(&self) -> Vec2;
}

impl Container for Vec2 {
    fn size(&self) -> Vec2 {
        *self
    }
}

/// A container size and the grid derived from it.
///
/// Everything is read through accessors and derived from the one
/// [`ZoneGrid`], so the recorded size and counts cannot drift from the
/// zones. Deserializing validates like [`ForceMapState::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceMapState {
    grid: ZoneGrid,
}

impl ForceMapState {
    /// Builds the state for a `width` x `height` container split into
    /// `cols` x `rows` zones.
    ///
    /// ### Returns
    /// The new state, or the [`ValidationError`] from [`ZoneGrid::new`].
    pub fn new(width: f32, height: f32, cols: usize, rows: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            grid: ZoneGrid::new(width, height, cols, rows)?,
        })
    }

    pub fn grid(&self) -> &ZoneGrid {
        &self.grid
    }

    pub fn container_width(&self) -> f32 {
        self.grid.width()
    }

    pub fn container_height(&self) -> f32 {
        self.grid.height()
    }

    /// Midpoint of the container.
    pub fn container_center(&self) -> Vec2 {
        Vec2::new(self.grid.width() / 2.0, self.grid.height() / 2.0)
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Builds the state that follows a resize.
    ///
    /// The grid is always rebuilt from scratch, and `self` is left
    /// untouched.
    ///
    /// ### Parameters
    /// - `width`, `height` - New container size.
    /// - `cols`, `rows` - New counts; `None` keeps the current count, while
    ///   `Some(0)` is a validation error like any other bad count.
    ///
    /// ### Returns
    /// The resized state, or the first failed precondition.
    pub fn resized(
        &self,
        width: f32,
        height: f32,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            width,
            height,
            cols.unwrap_or(self.cols()),
            rows.unwrap_or(self.rows()),
        )
    }
}

/// Owner of the current [`ForceMapState`].
#[derive(Clone, Debug)]
pub struct ForceMap {
    state: ForceMapState,
}

impl ForceMap {
    pub fn new(width: f32, height: f32, cols: usize, rows: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            state: ForceMapState::new(width, height, cols, rows)?,
        })
    }

    /// Builds a force map sized to `container`'s current size.
    ///
    /// ### Returns
    /// The map, or [`ValidationError`] if the size or counts are invalid.
    pub fn from_container(
        container: &impl Container,
        cols: usize,
        rows: usize,
    ) -> Result<Self, ValidationError> {
        let size = container.size();
        Self::new(size.x, size.y, cols, rows)
    }

    pub fn state(&self) -> &ForceMapState {
        &self.state
    }

    pub fn grid(&self) -> &ZoneGrid {
        self.state.grid()
    }

    /// Replaces the current state with a resized one.
    ///
    /// ### Parameters
    /// Same as [`ForceMapState::resized`].
    ///
    /// ### Returns
    /// The new current state, or the validation error that kept the old
    /// one in place.
    ///
    /// On error the previous state stays in place. Forces built from the
    /// old grid are not updated; callers rebuild them.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> Result<&ForceMapState, ValidationError> {
        let next = self.state.resized(width, height, cols, rows)?;
        log::info!(
            "force map resized to {}x{} with {}x{} zones",
            next.container_width(),
            next.container_height(),
            next.cols(),
            next.rows()
        );
        self.state = next;
        Ok(&self.state)
    }

    /// Re-reads the container size and resizes to it.
    pub fn refresh(
        &mut self,
        container: &impl Container,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> Result<&ForceMapState, ValidationError> {
        let size = container.size();
        self.resize(size.x, size.y, cols, rows)
    }
}
